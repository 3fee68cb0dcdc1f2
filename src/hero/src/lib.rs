// src/hero/src/lib.rs
//! 英雄：属性、成长、拾取效果与背包。

mod bag;
mod core;

pub use self::{
    bag::Bag,
    core::{BASE_ATTACK, BASE_DEFENSE, BASE_EXP_TO_NEXT, BASE_HP, Hero},
};
