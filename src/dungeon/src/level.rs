// src/dungeon/src/level.rs

use combat::{Enemy, Terrain};
use items::Item;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod rooms;
pub mod tiles;

use self::rooms::Room;
use self::tiles::Grid;

/// 楼梯与传送门，作为瓦片之上的覆盖层
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    StairsDown,
    StairsUp,
    Portal,
}

impl Feature {
    pub fn glyph(self) -> char {
        match self {
            Feature::StairsDown => '>',
            Feature::StairsUp => '<',
            Feature::Portal => 'P',
        }
    }
}

/// 一层地牢：网格 + 房间 + 实体 + 出口
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub depth: u32,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub stairs_down: Option<(i32, i32)>,
    pub stairs_up: Option<(i32, i32)>,
    pub portal: Option<(i32, i32)>,
}

impl Level {
    /// 全墙的空层
    pub fn new(width: i32, height: i32, depth: u32) -> Self {
        Self {
            depth,
            grid: Grid::new(width, height),
            rooms: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            stairs_down: None,
            stairs_up: None,
            portal: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// 玩家出生点：第一个房间的中心，没有房间时取地图中心
    pub fn spawn_point(&self) -> (i32, i32) {
        self.rooms
            .first()
            .map(Room::center)
            .unwrap_or((self.width() / 2, self.height() / 2))
    }

    /// At least one of stairs-down, stairs-up or portal is placed.
    pub fn has_exit(&self) -> bool {
        self.stairs_down.is_some() || self.stairs_up.is_some() || self.portal.is_some()
    }

    /// 强制放置出口(退化生成时使用)
    pub fn ensure_exit<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.has_exit() {
            return;
        }
        let spot = if self.rooms.is_empty() {
            let center = (self.width() / 2, self.height() / 2);
            self.grid.carve(center.0, center.1);
            center
        } else {
            let index = rng.random_range(0..self.rooms.len());
            self.rooms[index].random_interior_point(rng)
        };
        log::warn!(
            "depth {} generated without an exit, forcing stairs down at {:?}",
            self.depth,
            spot
        );
        self.stairs_down = Some(spot);
    }

    pub fn feature_at(&self, x: i32, y: i32) -> Option<Feature> {
        let here = Some((x, y));
        if self.stairs_down == here {
            Some(Feature::StairsDown)
        } else if self.stairs_up == here {
            Some(Feature::StairsUp)
        } else if self.portal == here {
            Some(Feature::Portal)
        } else {
            None
        }
    }

    pub fn enemy_at(&self, x: i32, y: i32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_at(x, y))
    }

    pub fn enemy_index_at(&self, x: i32, y: i32) -> Option<usize> {
        self.enemies.iter().position(|e| e.is_at(x, y))
    }

    pub fn item_at(&self, x: i32, y: i32) -> Option<&Item> {
        self.items.iter().find(|i| i.is_at(x, y))
    }

    /// 移除并返回该位置的物品
    pub fn take_item_at(&mut self, x: i32, y: i32) -> Option<Item> {
        let index = self.items.iter().position(|i| i.is_at(x, y))?;
        Some(self.items.remove(index))
    }

    /// 是否可以放置新物品(无物品、无敌人、无出口)
    pub fn is_free_for_item(&self, x: i32, y: i32) -> bool {
        self.item_at(x, y).is_none()
            && self.enemy_at(x, y).is_none()
            && self.feature_at(x, y).is_none()
    }
}

impl Terrain for Level {
    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable(x, y)
    }

    fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.grid.is_transparent(x, y)
    }
}
