// src/save/src/lib.rs
//! 存档：自描述的会话快照与存档目录管理。

use std::time::SystemTime;

use dungeon::Level;
use error::GameError;
use hero::Hero;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

mod system;

pub use system::{QUICKSAVE_SLOT, SaveSummary, SaveSystem};

/// Current save format version
///
/// Version 2 added the live RNG state; version 1 documents only carried the
/// seed and are no longer accepted.
pub const SAVE_VERSION: u32 = 2;

/// 存档中保留的消息条数上限
pub const MESSAGE_TAIL: usize = 20;

/// 一局游戏的终局状态
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Playing,
    Dead,
    Won,
}

/// 存档数据(包含游戏完整状态)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub version: u32,
    pub timestamp: SystemTime,
    pub character_name: String,
    /// 游戏时长(秒)
    pub playtime_secs: u64,

    pub player: Hero,
    pub depth: u32,
    pub state: RunState,
    #[serde(default)]
    pub messages: Vec<String>,

    pub map_width: i32,
    pub map_height: i32,
    /// Full level, including every tile's explored/visible flags.
    pub level: Level,

    #[serde(default)]
    pub turns: u64,
    pub seed: u64,
    /// 生成器当前状态(含流中的位置)
    pub rng: Pcg32,
}

pub(crate) fn version_mismatch(found: u64) -> GameError {
    GameError::VersionMismatch(format!("{found} (expected {SAVE_VERSION})"))
}

impl SaveDocument {
    /// Validate save data integrity
    pub fn validate(&self) -> Result<(), GameError> {
        if self.version != SAVE_VERSION {
            return Err(version_mismatch(u64::from(self.version)));
        }

        if self.depth == 0 {
            return Err(GameError::InvalidLevelData("depth must be at least 1".into()));
        }
        if self.level.depth != self.depth {
            return Err(GameError::InvalidLevelData(format!(
                "level depth {} does not match session depth {}",
                self.level.depth, self.depth
            )));
        }
        let expected = self.map_width.max(0) as usize * self.map_height.max(0) as usize;
        if self.level.grid.tiles().len() != expected {
            return Err(GameError::InvalidLevelData(format!(
                "{} tiles for a {}x{} map",
                self.level.grid.tiles().len(),
                self.map_width,
                self.map_height
            )));
        }

        if self.player.body.max_hp <= 0 {
            return Err(GameError::InvalidPlayerData("max hp must be positive".into()));
        }
        let (x, y) = self.player.position();
        if !self.level.grid.in_bounds(x, y) {
            return Err(GameError::InvalidPlayerData(format!(
                "position ({x}, {y}) is off the map"
            )));
        }
        Ok(())
    }

    /// 只保留最后 [`MESSAGE_TAIL`] 条消息
    pub fn trim_messages(&mut self) {
        if self.messages.len() > MESSAGE_TAIL {
            let excess = self.messages.len() - MESSAGE_TAIL;
            self.messages.drain(..excess);
        }
    }
}
