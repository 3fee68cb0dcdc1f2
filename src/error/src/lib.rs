//! 游戏错误处理模块
//!
//! Shared error taxonomy for every crate in the workspace. Turn resolution
//! never produces these; only persistence, configuration and catalog lookups
//! can fail.

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 存档系统错误
    #[error("Save system error: {0}")]
    SaveError(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 反序列化错误
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// 存档数据损坏
    #[error("Corrupted save data")]
    CorruptedSave,

    /// 存档版本不兼容
    #[error("Incompatible save version: {0}")]
    VersionMismatch(String),

    /// 玩家数据无效
    #[error("Invalid player data: {0}")]
    InvalidPlayerData(String),

    /// 地图数据无效
    #[error("Invalid level data: {0}")]
    InvalidLevelData(String),

    /// 配置无效
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 存档名必须是存档目录下的单个文件名
    #[error("Invalid save name: {0:?}")]
    InvalidSaveName(String),

    /// Catalog lookup with a key no template is registered under.
    /// Indicates a data bug, not a player error.
    #[error("Unknown {category} kind: {key:?}")]
    UnknownCatalogKey { category: &'static str, key: String },
}

impl GameError {
    pub fn unknown_key(category: &'static str, key: impl Into<String>) -> Self {
        GameError::UnknownCatalogKey {
            category,
            key: key.into(),
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            // 语法错误或文件截断通常意味着存档损坏
            Category::Syntax | Category::Eof => GameError::CorruptedSave,
            Category::Io => GameError::SerializationError(err.to_string()),
            Category::Data => GameError::DeserializationError(err.to_string()),
        }
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::CorruptedSave => "save data is corrupted".to_string(),
        GameError::VersionMismatch(v) => format!("incompatible save version {}", v),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "save file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => {
                "permission denied for save file".to_string()
            }
            _ => format!("IO error: {}", e),
        },
        GameError::SaveError(e) => format!("{:#}", e),
        _ => error.to_string(),
    }
}
