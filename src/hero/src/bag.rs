// src/hero/src/bag.rs
use items::Item;
use serde::{Deserialize, Serialize};

/// 背包：金币与非消耗品
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    gold: u32,
    items: Vec<Item>,
}

impl Bag {
    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// 存入物品(不限容量)
    pub fn store(&mut self, item: Item) {
        self.items.push(item);
    }
}
