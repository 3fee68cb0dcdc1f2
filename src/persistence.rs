//src/persistence.rs
//! Session <-> SaveDocument mapping.

use std::time::{Duration, Instant, SystemTime};

use error::GameError;
use save::{MESSAGE_TAIL, SAVE_VERSION, SaveDocument, SaveSystem};

use crate::config::GameConfig;
use crate::rng::GameRng;
use crate::session::{MessageLog, Session};

impl Session {
    /// 捕获当前会话的完整快照
    pub fn to_save_document(&self) -> SaveDocument {
        SaveDocument {
            version: SAVE_VERSION,
            timestamp: SystemTime::now(),
            character_name: self.config.character_name.clone(),
            playtime_secs: self.playtime_secs(),
            player: self.player.clone(),
            depth: self.depth,
            state: self.state,
            messages: self.messages.tail(MESSAGE_TAIL),
            map_width: self.level.width(),
            map_height: self.level.height(),
            level: self.level.clone(),
            turns: self.turns,
            seed: self.rng.seed(),
            rng: self.rng.state().clone(),
        }
    }

    /// Rebuilds a session from a document. Explored flags are kept as saved;
    /// visibility is recomputed from the restored player position. The RNG
    /// resumes at the saved stream position.
    pub fn from_save_document(config: GameConfig, doc: SaveDocument) -> Result<Self, GameError> {
        doc.validate()?;

        let config = GameConfig {
            map_width: doc.map_width,
            map_height: doc.map_height,
            character_name: doc.character_name.clone(),
            ..config
        };
        let saves = SaveSystem::new(config.save_dir.clone());

        let mut messages = MessageLog::default();
        for line in doc.messages {
            messages.push(line);
        }

        let mut session = Self {
            config,
            player: doc.player,
            level: doc.level,
            depth: doc.depth,
            state: doc.state,
            messages,
            rng: GameRng::from_state(doc.seed, doc.rng),
            saves,
            turns: doc.turns,
            playtime_base: Duration::from_secs(doc.playtime_secs),
            started: Instant::now(),
        };
        session.refresh_fov();
        session
            .messages
            .push(format!("Welcome back, {}!", session.config.character_name));
        session
            .messages
            .push(format!("Resumed at dungeon level {}", session.depth));

        log::info!(
            "restored {} at depth {} ({} turns)",
            session.config.character_name,
            session.depth,
            session.turns
        );
        Ok(session)
    }

    /// 保存到存档目录，返回文件名
    pub fn save(&self, slot: Option<&str>) -> Result<String, GameError> {
        self.saves.save(&self.to_save_document(), slot)
    }

    /// 从 `config.save_dir` 中读取存档
    pub fn load(config: GameConfig, file_name: &str) -> Result<Self, GameError> {
        let doc = SaveSystem::new(config.save_dir.clone()).load(file_name)?;
        Self::from_save_document(config, doc)
    }
}
