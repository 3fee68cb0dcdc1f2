// src/dungeon/src/generator.rs
//! Rooms-and-corridors level generation.

use combat::{Enemy, EnemyKind};
use items::catalog::ItemTemplate;
use items::{Item, ItemKind};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::level::Level;
use crate::level::rooms::Room;

pub const BASE_ROOM_ATTEMPTS: u32 = 15;
pub const MIN_ROOM_SIZE: i32 = 4;
pub const ENEMY_ROOM_CHANCE: f64 = 0.8;
pub const ITEM_ROOM_CHANCE: f64 = 0.6;

pub struct DungeonGenerator;

impl DungeonGenerator {
    /// 生成一层完整的地牢
    pub fn generate<R: Rng + ?Sized>(width: i32, height: i32, depth: u32, rng: &mut R) -> Level {
        let rooms = Self::plan_rooms(width, height, depth, rng);
        Self::assemble(width, height, depth, rooms, rng)
    }

    /// 拒绝采样放置房间
    pub fn plan_rooms<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        depth: u32,
        rng: &mut R,
    ) -> Vec<Room> {
        let attempts = BASE_ROOM_ATTEMPTS + 2 * depth;
        let max_size = 8 + (depth as i32 / 2).min(4);
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..attempts {
            let w = rng.random_range(MIN_ROOM_SIZE..=max_size);
            let h = rng.random_range(MIN_ROOM_SIZE..=max_size);
            // 房间放不下就放弃这次尝试
            if width - w - 1 < 1 || height - h - 1 < 1 {
                continue;
            }
            let x = rng.random_range(1..=width - w - 1);
            let y = rng.random_range(1..=height - h - 1);
            let candidate = Room::new(x, y, w, h);

            if !rooms.iter().any(|other| candidate.intersects(other)) {
                rooms.push(candidate);
            }
        }
        rooms
    }

    /// Carves `rooms` in order, links each to its predecessor, then places
    /// exits and population.
    pub fn assemble<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        depth: u32,
        rooms: Vec<Room>,
        rng: &mut R,
    ) -> Level {
        let mut level = Level::new(width, height, depth);

        for (i, room) in rooms.iter().enumerate() {
            level.grid.carve_rect(room.x, room.y, room.width, room.height);
            if i > 0 {
                Self::carve_corridor(&mut level, rooms[i - 1].center(), room.center(), rng);
            }
        }
        level.rooms = rooms;

        Self::place_exits(&mut level, rng);
        level.ensure_exit(rng);
        Self::populate_enemies(&mut level, rng);
        Self::populate_items(&mut level, rng);

        log::debug!(
            "generated depth {}: {} rooms, {} enemies, {} items, exits down={:?} up={:?} portal={:?}",
            depth,
            level.rooms.len(),
            level.enemies.len(),
            level.items.len(),
            level.stairs_down,
            level.stairs_up,
            level.portal
        );
        level
    }

    /// L形走廊，随机决定先横后竖或先竖后横
    fn carve_corridor<R: Rng + ?Sized>(
        level: &mut Level,
        (x1, y1): (i32, i32),
        (x2, y2): (i32, i32),
        rng: &mut R,
    ) {
        if rng.random_bool(0.5) {
            level.grid.carve_horizontal(x1, x2, y1);
            level.grid.carve_vertical(y1, y2, x2);
        } else {
            level.grid.carve_vertical(y1, y2, x1);
            level.grid.carve_horizontal(x1, x2, y2);
        }
    }

    fn place_exits<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
        let depth = level.depth;
        if let Some(last) = level.rooms.last() {
            level.stairs_down = Some(last.random_interior_point(rng));
        }
        if depth > 1 {
            if let Some(first) = level.rooms.first() {
                level.stairs_up = Some(first.random_interior_point(rng));
            }
        }
        if depth >= 5 && depth % 5 == 0 && level.rooms.len() >= 3 {
            let middle = level.rooms[level.rooms.len() / 2];
            level.portal = Some(middle.random_interior_point(rng));
        }
    }

    /// Depth multiplier applied to every spawned enemy.
    pub fn enemy_scale(depth: u32) -> f64 {
        1.0 + (depth.saturating_sub(1)) as f64 * 0.2
    }

    /// 按权重表抽取敌人种类
    pub fn roll_enemy_kind<R: Rng + ?Sized>(depth: u32, rng: &mut R) -> EnemyKind {
        let table = EnemyKind::spawn_table(depth);
        table
            .choose_weighted(rng, |&(_, weight)| weight)
            .map(|&(kind, _)| kind)
            .unwrap_or(EnemyKind::Rat)
    }

    fn populate_enemies<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
        let depth = level.depth;
        let max_per_room = (1 + depth / 3).min(4);
        let scale = Self::enemy_scale(depth);

        // 第一个房间留给玩家
        for room in level.rooms.clone().iter().skip(1) {
            if !rng.random_bool(ENEMY_ROOM_CHANCE) {
                continue;
            }
            let count = rng.random_range(1..=max_per_room);
            for _ in 0..count {
                let (x, y) = room.random_interior_point(rng);
                if level.enemy_at(x, y).is_some() {
                    continue;
                }
                let mut enemy = Enemy::new(Self::roll_enemy_kind(depth, rng), x, y);
                enemy.scale(scale);
                level.enemies.push(enemy);
            }
        }
    }

    fn populate_items<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
        let depth = level.depth;
        let table = ItemTemplate::floor_table(depth);

        for room in level.rooms.clone().iter() {
            if !rng.random_bool(ITEM_ROOM_CHANCE) {
                continue;
            }
            let count = rng.random_range(1..=3);
            for _ in 0..count {
                let (x, y) = room.random_interior_point(rng);
                if !level.is_free_for_item(x, y) {
                    continue;
                }
                let Some(&template) = table.choose(rng) else {
                    continue;
                };
                let mut item = Item::new(template, x, y);
                match item.kind {
                    ItemKind::Gold => item.scale_value(1.0 + depth as f64 * 0.3),
                    ItemKind::Potion => item.scale_value(1.0 + depth as f64 * 0.1),
                    _ => {}
                }
                level.items.push(item);
            }
        }
    }
}
