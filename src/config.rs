//src/config.rs
use std::{fs, path::Path, path::PathBuf};

use error::GameError;
use serde::{Deserialize, Serialize};

/// 地图最小边长：最大房间加上边距必须放得下
pub const MIN_MAP_SIZE: i32 = 20;

/// 游戏配置，缺省字段取默认值
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: i32,
    pub map_height: i32,
    /// 玩家视野半径
    pub fov_radius: u32,
    /// 敌人视野半径(比玩家短)
    pub enemy_sight_radius: u32,
    pub save_dir: PathBuf,
    pub character_name: String,
    /// 固定种子；为空时使用随机种子
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 50,
            fov_radius: 8,
            enemy_sight_radius: 6,
            save_dir: PathBuf::from("saves"),
            character_name: "Hero".to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str) -> Result<Self, GameError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.map_width < MIN_MAP_SIZE || self.map_height < MIN_MAP_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "map must be at least {MIN_MAP_SIZE}x{MIN_MAP_SIZE}, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.fov_radius == 0 || self.enemy_sight_radius == 0 {
            return Err(GameError::InvalidConfig("sight radii must be positive".into()));
        }
        Ok(())
    }
}
