//src/items/src/lib.rs
//! 物品系统
//!
//! Floor items and the fixed template catalog they are stamped from. Items are
//! owned by the current level until picked up; consumable kinds are applied on
//! pickup and never reach an inventory.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub mod catalog;

pub use crate::catalog::{ItemStats, ItemTemplate};

/// 显示颜色(RGB)
pub type Color = (u8, u8, u8);

/// 物品类别
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Potion,
    Weapon,
    Armor,
    Gold,
}

impl ItemKind {
    /// 拾取时立即生效的类别
    pub fn is_consumable(self) -> bool {
        matches!(self, ItemKind::Potion | ItemKind::Gold)
    }
}

/// 地面上的物品实例
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub glyph: char,
    pub color: Color,
    pub kind: ItemKind,
    /// 治疗量 / 金币数量 / 装备加成
    pub value: u32,
}

impl Item {
    /// 按模板创建物品
    pub fn new(template: ItemTemplate, x: i32, y: i32) -> Self {
        let stats = template.stats();
        Self {
            x,
            y,
            name: stats.name.to_string(),
            glyph: stats.glyph,
            color: stats.color,
            kind: stats.kind,
            value: stats.value,
        }
    }

    /// 按目录键创建物品，未知键返回错误
    pub fn spawn(key: &str, x: i32, y: i32) -> Result<Self, error::GameError> {
        Ok(Self::new(ItemTemplate::from_key(key)?, x, y))
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    pub fn is_consumable(&self) -> bool {
        self.kind.is_consumable()
    }

    /// Multiplies `value` by `factor`, truncating toward zero.
    pub fn scale_value(&mut self, factor: f64) {
        self.value = (self.value as f64 * factor) as u32;
    }
}
