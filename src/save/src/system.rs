// src/save/src/system.rs

use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;
use error::GameError;
use scopeguard::ScopeGuard;
use serde::Deserialize;

use crate::{SAVE_VERSION, SaveDocument, version_mismatch};

/// 快速存档槽位
pub const QUICKSAVE_SLOT: &str = "quicksave";

const EXTENSION: &str = "json";

/// 存档列表中的一行
#[derive(Clone, Debug, PartialEq)]
pub struct SaveSummary {
    pub file_name: String,
    pub character_name: String,
    pub player_level: u32,
    pub depth: u32,
    pub max_depth: u32,
    pub gold: u32,
    pub timestamp: SystemTime,
    pub playtime_secs: u64,
}

/// Only the fields a listing needs; everything else in the file is ignored.
#[derive(Deserialize)]
struct SummaryHeader {
    character_name: String,
    timestamp: SystemTime,
    playtime_secs: u64,
    depth: u32,
    player: PlayerHeader,
}

#[derive(Deserialize)]
struct PlayerHeader {
    level: u32,
    max_depth: u32,
    bag: BagHeader,
}

#[derive(Deserialize)]
struct BagHeader {
    gold: u32,
}

/// 存档系统
#[derive(Clone, Debug)]
pub struct SaveSystem {
    save_dir: PathBuf,
}

impl SaveSystem {
    /// 目录在第一次保存时才创建
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// `slot` gets `.json` appended when missing; no slot means
    /// `save_<unix seconds>.json` from the document timestamp. A slot must be
    /// a plain file name, never a path.
    pub fn file_name_for(slot: Option<&str>, timestamp: SystemTime) -> Result<String, GameError> {
        match slot {
            Some(name) => {
                Self::check_slot(name)?;
                if name.ends_with(".json") {
                    Ok(name.to_string())
                } else {
                    Ok(format!("{name}.{EXTENSION}"))
                }
            }
            None => Ok(format!("{}.{EXTENSION}", Self::default_stem(timestamp))),
        }
    }

    fn check_slot(name: &str) -> Result<(), GameError> {
        let stem = name.strip_suffix(".json").unwrap_or(name);
        if stem.is_empty() || stem == "." || stem == ".." || name.contains(['/', '\\']) {
            return Err(GameError::InvalidSaveName(name.to_string()));
        }
        Ok(())
    }

    fn default_stem(timestamp: SystemTime) -> String {
        let secs = timestamp
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        format!("save_{secs}")
    }

    /// 同一秒内的多次默认存档依次追加 `_2`、`_3`
    fn unused_default_name(&self, timestamp: SystemTime) -> String {
        let stem = Self::default_stem(timestamp);
        let first = format!("{stem}.{EXTENSION}");
        if !self.save_dir.join(&first).exists() {
            return first;
        }
        (2u32..)
            .map(|n| format!("{stem}_{n}.{EXTENSION}"))
            .find(|name| !self.save_dir.join(name).exists())
            .unwrap_or(first)
    }

    pub fn path_for(&self, file_name: &str) -> Result<PathBuf, GameError> {
        Ok(self.save_dir.join(Self::file_name_for(Some(file_name), UNIX_EPOCH)?))
    }

    pub fn has_save(&self, file_name: &str) -> bool {
        self.path_for(file_name).is_ok_and(|path| path.is_file())
    }

    /// 保存游戏状态，返回写入的文件名
    pub fn save(&self, doc: &SaveDocument, slot: Option<&str>) -> Result<String, GameError> {
        let file_name = match slot {
            Some(_) => Self::file_name_for(slot, doc.timestamp)?,
            None => self.unused_default_name(doc.timestamp),
        };
        let path = self.save_dir.join(&file_name);

        fs::create_dir_all(&self.save_dir).context("Failed to create save directory")?;

        let text = serde_json::to_string_pretty(doc)
            .map_err(|e| GameError::SerializationError(e.to_string()))?;

        // 先写临时文件，再原子性重命名；任何一步失败都清理临时文件
        let temp_path = scopeguard::guard(path.with_extension("tmp"), |temp| {
            if temp.exists() {
                if let Err(err) = fs::remove_file(&temp) {
                    log::warn!("could not remove {}: {err}", temp.display());
                }
            }
        });
        fs::write(&*temp_path, text).context("Failed to write temporary save file")?;
        fs::rename(&*temp_path, &path).context("Failed to commit save file")?;
        let _ = ScopeGuard::into_inner(temp_path);

        log::info!("saved {} to {}", doc.character_name, path.display());
        Ok(file_name)
    }

    /// 加载游戏状态
    pub fn load(&self, file_name: &str) -> Result<SaveDocument, GameError> {
        let path = self.path_for(file_name)?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Save file not found: {}", path.display()))?;

        // 版本号先于结构检查，其他版本的存档即使结构不同也报告版本不兼容
        let value: serde_json::Value = serde_json::from_str(&text)?;
        match value.get("version").and_then(serde_json::Value::as_u64) {
            Some(version) if version == u64::from(SAVE_VERSION) => {}
            Some(version) => return Err(version_mismatch(version)),
            None => {
                return Err(GameError::DeserializationError(
                    "missing save format version".into(),
                ));
            }
        }

        let mut doc: SaveDocument = serde_json::from_value(value)?;
        doc.validate()?;
        doc.trim_messages();

        log::info!("loaded {} from {}", doc.character_name, path.display());
        Ok(doc)
    }

    /// 删除存档(不存在时忽略)
    pub fn delete(&self, file_name: &str) -> Result<(), GameError> {
        let path = self.path_for(file_name)?;
        if path.exists() {
            fs::remove_file(&path).context("Failed to delete save file")?;
            log::info!("deleted {}", path.display());
        }
        Ok(())
    }

    /// 获取所有存档列表(按时间倒序)，无法解析的文件跳过
    pub fn list_saves(&self) -> Result<Vec<SaveSummary>, GameError> {
        if !self.save_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.save_dir).context("Failed to read save directory")?;
        let mut saves = Vec::new();

        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }

            match Self::summarize(&path) {
                Ok(summary) => saves.push(summary),
                Err(err) => log::warn!("skipping unreadable save {}: {err}", path.display()),
            }
        }

        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(saves)
    }

    fn summarize(path: &Path) -> anyhow::Result<SaveSummary> {
        let text = fs::read_to_string(path)?;
        let header: SummaryHeader = serde_json::from_str(&text)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(SaveSummary {
            file_name,
            character_name: header.character_name,
            player_level: header.player.level,
            depth: header.depth,
            max_depth: header.player.max_depth,
            gold: header.player.bag.gold,
            timestamp: header.timestamp,
            playtime_secs: header.playtime_secs,
        })
    }
}
