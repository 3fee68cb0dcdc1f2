// src/dungeon/src/director.rs
//! Per-depth theming, special features and difficulty on top of the
//! generator.

use combat::{Enemy, EnemyKind};
use items::catalog::ItemTemplate;
use items::{Item, ItemKind};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::generator::DungeonGenerator;
use crate::level::Level;

/// 主题表：(起始深度, 名称, 描述)
static THEMES: [(u32, &str, [&str; 3]); 8] = [
    (
        1,
        "Surface Caves",
        [
            "Damp stone walls glisten in the torchlight.",
            "You hear the dripping of water echoing through the cavern.",
            "Moss grows on the ancient stone blocks.",
        ],
    ),
    (
        5,
        "Underground Tunnels",
        [
            "Carved passages wind deeper into the earth.",
            "The air grows thick and musty.",
            "Strange symbols are etched into the walls.",
        ],
    ),
    (
        10,
        "Ancient Crypts",
        [
            "Dusty tombs line the corridors.",
            "The smell of decay fills the air.",
            "Ancient bones crunch underfoot.",
        ],
    ),
    (
        15,
        "Molten Depths",
        [
            "Heat radiates from glowing cracks in the walls.",
            "Lava bubbles in distant chambers.",
            "The air shimmers with intense heat.",
        ],
    ),
    (
        20,
        "Crystal Caverns",
        [
            "Brilliant crystals illuminate the cavern.",
            "Light refracts in rainbow patterns.",
            "The walls hum with magical energy.",
        ],
    ),
    (
        25,
        "Shadow Realm",
        [
            "Darkness seems to move with a life of its own.",
            "Whispers echo from unseen sources.",
            "Reality feels unstable here.",
        ],
    ),
    (
        30,
        "Dragon's Lair",
        [
            "Massive claw marks scar the walls.",
            "The scent of sulfur is overwhelming.",
            "Treasure glints in the shadows.",
        ],
    ),
    (
        50,
        "Abyss Gates",
        [
            "The very fabric of reality tears here.",
            "Otherworldly energies crackle in the air.",
            "You sense immense power beyond comprehension.",
        ],
    ),
];

/// 特殊楼层特性(可同时出现)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialFeatures {
    pub boss_room: bool,
    pub treasure_room: bool,
    pub magic_portal: bool,
    pub rest_area: bool,
}

impl SpecialFeatures {
    pub fn for_depth(depth: u32) -> Self {
        Self {
            boss_room: depth % 10 == 0,
            treasure_room: depth % 7 == 0,
            magic_portal: depth >= 5 && depth % 5 == 0,
            rest_area: depth % 15 == 0,
        }
    }

    /// Log lines announcing each active feature, in a fixed order.
    pub fn announcements(&self) -> Vec<&'static str> {
        [
            (self.boss_room, "You sense a powerful presence nearby..."),
            (self.treasure_room, "You smell the glint of treasure in the air."),
            (self.magic_portal, "Magical energies swirl around this place."),
            (self.rest_area, "This place feels safe and peaceful."),
        ]
        .into_iter()
        .filter_map(|(active, line)| active.then_some(line))
        .collect()
    }
}

pub struct LevelDirector;

impl LevelDirector {
    fn theme_entry(depth: u32) -> &'static (u32, &'static str, [&'static str; 3]) {
        THEMES
            .iter()
            .rev()
            .find(|(threshold, _, _)| *threshold <= depth)
            .unwrap_or(&THEMES[0])
    }

    /// 当前深度的主题名
    pub fn theme(depth: u32) -> &'static str {
        Self::theme_entry(depth).1
    }

    /// 随机选取一条主题描述
    pub fn description<R: Rng + ?Sized>(depth: u32, rng: &mut R) -> &'static str {
        let lines = &Self::theme_entry(depth).2;
        lines.choose(rng).copied().unwrap_or(lines[0])
    }

    /// 分段线性的难度系数
    pub fn difficulty_multiplier(depth: u32) -> f64 {
        let d = depth as f64;
        1.0 + match depth {
            0..=10 => (d - 1.0) * 0.15,
            11..=25 => 1.5 + (d - 10.0) * 0.25,
            26..=50 => 5.25 + (d - 25.0) * 0.4,
            _ => 15.25 + (d - 50.0) * 0.5,
        }
    }

    pub fn features(depth: u32) -> SpecialFeatures {
        SpecialFeatures::for_depth(depth)
    }

    /// Generates a level, guarantees an exit and injects boss and treasure
    /// rooms where the depth calls for them.
    pub fn generate_level<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        depth: u32,
        rng: &mut R,
    ) -> Level {
        let mut level = DungeonGenerator::generate(width, height, depth, rng);
        level.ensure_exit(rng);

        let features = Self::features(depth);
        if features.boss_room && level.rooms.len() >= 2 {
            Self::populate_boss_room(&mut level, rng);
        }
        if features.treasure_room && level.rooms.len() >= 3 {
            Self::populate_treasure_room(&mut level, rng);
        }
        level
    }

    /// 首领种类随深度变化
    pub fn boss_kinds(depth: u32) -> &'static [EnemyKind] {
        match depth {
            0..=10 => &[EnemyKind::Orc, EnemyKind::Troll],
            11..=25 => &[EnemyKind::Troll, EnemyKind::Dragon],
            _ => &[EnemyKind::Dragon],
        }
    }

    fn populate_boss_room<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
        let Some(&room) = level.rooms.last() else {
            return;
        };
        let kinds = Self::boss_kinds(level.depth);
        let count = rng.random_range(1..=2);
        for _ in 0..count {
            let (x, y) = room.random_interior_point(rng);
            if level.enemy_at(x, y).is_some() {
                continue;
            }
            let Some(&kind) = kinds.choose(rng) else {
                continue;
            };
            let mut boss = Enemy::new(kind, x, y);
            boss.promote_to_boss();
            log::debug!("{} guards depth {} at ({x}, {y})", boss.name, level.depth);
            level.enemies.push(boss);
        }
    }

    fn populate_treasure_room<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
        let inner = &level.rooms[1..level.rooms.len() - 1];
        let Some(&room) = inner.choose(rng) else {
            return;
        };
        let depth = level.depth;
        let table = ItemTemplate::treasure_table(depth);
        let count = rng.random_range(3..=5);
        for _ in 0..count {
            let (x, y) = room.random_interior_point(rng);
            if level.item_at(x, y).is_some() || level.enemy_at(x, y).is_some() {
                continue;
            }
            let Some(&template) = table.choose(rng) else {
                continue;
            };
            let mut item = Item::new(template, x, y);
            if item.kind == ItemKind::Gold {
                item.scale_value(2.0 + depth as f64 * 0.1);
            }
            level.items.push(item);
        }
    }
}
