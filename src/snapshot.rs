//src/snapshot.rs
//! Read-only views handed to a display layer.

use dungeon::{Feature, LevelDirector};
use items::Color;
use save::RunState;
use serde::Serialize;

use crate::session::Session;

/// 消息面板显示的条数
pub const VISIBLE_MESSAGES: usize = 10;

/// 状态栏所需的全部数据
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub gold: u32,
    pub attack: i32,
    pub defense: i32,
    pub depth: u32,
    pub max_depth: u32,
    pub messages: Vec<String>,
    pub state: RunState,
    pub has_portal: bool,
    pub playtime: String,
    pub theme: &'static str,
    pub difficulty: f64,
    pub turns: u64,
}

/// One cell as the renderer sees it. Stairs and portals come as an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub glyph: char,
    pub color: Color,
    pub walkable: bool,
    pub transparent: bool,
    pub explored: bool,
    pub visible: bool,
    pub feature: Option<Feature>,
}

/// `HH:MM:SS` once an hour has passed, `MM:SS` before that.
pub fn format_playtime(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

impl Session {
    pub fn snapshot(&self) -> StateSnapshot {
        let player = &self.player;
        StateSnapshot {
            hp: player.body.hp,
            max_hp: player.body.max_hp,
            level: player.level,
            exp: player.exp,
            exp_to_next: player.exp_to_next,
            gold: player.gold(),
            attack: player.attack,
            defense: player.defense,
            depth: self.depth,
            max_depth: player.max_depth,
            messages: self.messages.tail(VISIBLE_MESSAGES),
            state: self.state,
            has_portal: self.level.portal.is_some(),
            playtime: format_playtime(self.playtime_secs()),
            theme: LevelDirector::theme(self.depth),
            difficulty: LevelDirector::difficulty_multiplier(self.depth),
            turns: self.turns,
        }
    }

    /// 查询单个格子的渲染信息，越界返回 None
    pub fn tile_view(&self, x: i32, y: i32) -> Option<TileView> {
        let tile = self.level.grid.get_tile(x, y)?;
        Some(TileView {
            glyph: tile.glyph,
            color: tile.color,
            walkable: tile.walkable,
            transparent: tile.transparent,
            explored: tile.explored,
            visible: tile.visible,
            feature: self.level.feature_at(x, y),
        })
    }
}
