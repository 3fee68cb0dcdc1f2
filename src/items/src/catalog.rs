//src/items/src/catalog.rs
use std::str::FromStr;

use error::GameError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Color, ItemKind};

const GOLD: Color = (255, 215, 0);

/// 物品模板的基础属性
#[derive(Debug, PartialEq, Eq)]
pub struct ItemStats {
    pub name: &'static str,
    pub glyph: char,
    pub color: Color,
    pub kind: ItemKind,
    pub value: u32,
}

/// 物品目录键
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemTemplate {
    HealthPotion,
    GoldSmall,
    GoldLarge,
}

static HEALTH_POTION: ItemStats = ItemStats {
    name: "Health Potion",
    glyph: '!',
    color: (255, 0, 0),
    kind: ItemKind::Potion,
    value: 30,
};

static GOLD_SMALL: ItemStats = ItemStats {
    name: "Gold Coins",
    glyph: '$',
    color: GOLD,
    kind: ItemKind::Gold,
    value: 25,
};

static GOLD_LARGE: ItemStats = ItemStats {
    name: "Gold Pile",
    glyph: '$',
    color: GOLD,
    kind: ItemKind::Gold,
    value: 100,
};

impl ItemTemplate {
    pub fn stats(self) -> &'static ItemStats {
        match self {
            ItemTemplate::HealthPotion => &HEALTH_POTION,
            ItemTemplate::GoldSmall => &GOLD_SMALL,
            ItemTemplate::GoldLarge => &GOLD_LARGE,
        }
    }

    /// Exact-match lookup. An unknown key is a catalog bug and is reported,
    /// never mapped to a default template.
    pub fn from_key(key: &str) -> Result<Self, GameError> {
        ItemTemplate::from_str(key).map_err(|_| GameError::unknown_key("item", key))
    }

    /// 按深度划分的地面掉落表(均匀抽取)
    pub fn floor_table(depth: u32) -> &'static [ItemTemplate] {
        use ItemTemplate::*;
        match depth {
            0..=3 => &[HealthPotion, GoldSmall],
            4..=8 => &[HealthPotion, GoldSmall, GoldLarge],
            _ => &[HealthPotion, GoldLarge, GoldLarge],
        }
    }

    /// 宝藏房间掉落表(均匀抽取)
    pub fn treasure_table(depth: u32) -> &'static [ItemTemplate] {
        use ItemTemplate::*;
        match depth {
            0..=5 => &[HealthPotion, GoldLarge],
            _ => &[GoldLarge],
        }
    }
}
