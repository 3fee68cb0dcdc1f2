// src/hero/src/core.rs
use combat::{Body, Combat, Combatant, Enemy, Terrain};
use items::{Color, Item, ItemKind};
use serde::{Deserialize, Serialize};

use crate::bag::Bag;

pub const HERO_GLYPH: char = '@';
pub const HERO_COLOR: Color = (255, 255, 255);
pub const BASE_HP: i32 = 100;
pub const BASE_ATTACK: i32 = 10;
pub const BASE_DEFENSE: i32 = 5;
pub const BASE_EXP_TO_NEXT: u32 = 100;

/// 英雄核心数据结构
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(flatten)]
    pub body: Body,

    // 成长系统
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub attack: i32,
    pub defense: i32,

    pub bag: Bag,
    /// 到达过的最深层数
    pub max_depth: u32,
}

impl Hero {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            body: Body::new(x, y, HERO_GLYPH, HERO_COLOR, BASE_HP),
            level: 1,
            exp: 0,
            exp_to_next: BASE_EXP_TO_NEXT,
            attack: BASE_ATTACK,
            defense: BASE_DEFENSE,
            bag: Bag::default(),
            max_depth: 1,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.body.position()
    }

    pub fn gold(&self) -> u32 {
        self.bag.gold()
    }

    pub fn inventory(&self) -> &[Item] {
        self.bag.items()
    }

    /// 攻击敌人，返回造成的伤害
    pub fn attack_enemy(&self, enemy: &mut Enemy) -> i32 {
        Combat::strike(self, enemy)
    }

    /// Adds experience and performs at most one level-up. Returns the
    /// level-up message when one happened.
    pub fn gain_exp(&mut self, amount: u32) -> Option<String> {
        self.exp = self.exp.saturating_add(amount);
        (self.exp >= self.exp_to_next).then(|| self.level_up())
    }

    /// 升级：生命回满，攻防提升，下一级所需经验 ×1.5
    pub fn level_up(&mut self) -> String {
        self.level += 1;
        self.exp = self.exp.saturating_sub(self.exp_to_next);
        self.exp_to_next = (self.exp_to_next as f64 * 1.5) as u32;
        self.body.max_hp += 20;
        self.body.hp = self.body.max_hp;
        self.attack += 3;
        self.defense += 2;
        log::info!("hero reached level {}", self.level);
        format!("Level up! Now level {}", self.level)
    }

    /// 拾取物品并立即生效，返回拾取描述
    pub fn pick_up(&mut self, item: Item) -> String {
        let effect = match item.kind {
            ItemKind::Potion => {
                self.body.heal(item.value as i32);
                format!("Restored {} HP", item.value)
            }
            ItemKind::Gold => {
                self.bag.add_gold(item.value);
                format!("Found {} gold", item.value)
            }
            ItemKind::Weapon | ItemKind::Armor => String::from("Stored in your pack"),
        };
        let message = format!("You picked up {}. {}", item.name, effect);
        if !item.is_consumable() {
            self.bag.store(item);
        }
        message
    }

    /// 尝试移动，目标不可通行时不动
    pub fn move_by<T>(&mut self, dx: i32, dy: i32, terrain: &T) -> bool
    where
        T: Terrain + ?Sized,
    {
        let (nx, ny) = (self.body.x + dx, self.body.y + dy);
        if terrain.is_walkable(nx, ny) {
            self.body.set_position(nx, ny);
            true
        } else {
            false
        }
    }

    pub fn place_at(&mut self, (x, y): (i32, i32)) {
        self.body.set_position(x, y);
    }

    /// Records a newly reached depth; returns true on a new record.
    pub fn record_depth(&mut self, depth: u32) -> bool {
        if depth > self.max_depth {
            self.max_depth = depth;
            true
        } else {
            false
        }
    }
}

impl Combatant for Hero {
    fn name(&self) -> &str {
        "you"
    }

    fn attack_power(&self) -> i32 {
        self.attack
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
