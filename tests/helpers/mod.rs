//! Test helpers for building sessions with scripted arenas.
//!
//! Generated levels are random; scenario tests swap in a hand-built open
//! room so positions, enemies and items are fully under the test's control.

#![allow(dead_code)]

use std::path::Path;

use deep_delve::combat::{Enemy, EnemyKind};
use deep_delve::dungeon::{Level, Room};
use deep_delve::items::{Item, ItemTemplate};
use deep_delve::{GameConfig, Session};

/// Room carved by [`TestSessionBuilder`], spanning (1,1)..=(20,20).
pub const ARENA: Room = Room {
    x: 1,
    y: 1,
    width: 20,
    height: 20,
};

/// Builder for sessions placed in a deterministic arena
pub struct TestSessionBuilder {
    config: GameConfig,
    depth: u32,
    player: (i32, i32),
    enemies: Vec<Enemy>,
    items: Vec<Item>,
    stairs_down: Option<(i32, i32)>,
    stairs_up: Option<(i32, i32)>,
    portal: Option<(i32, i32)>,
}

impl TestSessionBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            config: GameConfig {
                seed: Some(seed),
                ..GameConfig::default()
            },
            depth: 1,
            player: (5, 5),
            enemies: Vec::new(),
            items: Vec::new(),
            stairs_down: None,
            stairs_up: None,
            portal: None,
        }
    }

    pub fn save_dir(mut self, dir: &Path) -> Self {
        self.config.save_dir = dir.to_path_buf();
        self
    }

    pub fn player_at(mut self, x: i32, y: i32) -> Self {
        self.player = (x, y);
        self
    }

    pub fn enemy(mut self, kind: EnemyKind, x: i32, y: i32) -> Self {
        self.enemies.push(Enemy::new(kind, x, y));
        self
    }

    pub fn enemy_with_hp(mut self, kind: EnemyKind, x: i32, y: i32, hp: i32) -> Self {
        let mut enemy = Enemy::new(kind, x, y);
        enemy.body.hp = hp;
        self.enemies.push(enemy);
        self
    }

    pub fn item(mut self, template: ItemTemplate, x: i32, y: i32) -> Self {
        self.items.push(Item::new(template, x, y));
        self
    }

    pub fn stairs_down(mut self, x: i32, y: i32) -> Self {
        self.stairs_down = Some((x, y));
        self
    }

    pub fn stairs_up(mut self, x: i32, y: i32) -> Self {
        self.stairs_up = Some((x, y));
        self
    }

    pub fn portal(mut self, x: i32, y: i32) -> Self {
        self.portal = Some((x, y));
        self
    }

    pub fn build(self) -> Session {
        let mut session = Session::new(self.config).expect("valid test config");

        let mut level = Level::new(30, 30, self.depth);
        level
            .grid
            .carve_rect(ARENA.x, ARENA.y, ARENA.width, ARENA.height);
        level.rooms.push(ARENA);
        level.enemies = self.enemies;
        level.items = self.items;
        level.stairs_down = self.stairs_down;
        level.stairs_up = self.stairs_up;
        level.portal = self.portal;

        *session.level_mut() = level;
        session.player_mut().place_at(self.player);
        session.refresh_fov();
        session
    }
}

/// Whether any line currently in the log equals `line`.
pub fn logged(session: &Session, line: &str) -> bool {
    session.messages().iter().any(|l| l == line)
}
