// src/combat/src/lib.rs
//! Combat arithmetic, enemies and the line-of-sight primitive.
//!
//! Player and enemies share a [`Body`] (position, glyph, colour, hit points)
//! and carry their own combat fields on top of it. Both implement
//! [`Combatant`], so a single damage formula serves both directions.

pub mod ai;
pub mod body;
pub mod enemy;
pub mod vision;

pub use crate::ai::PATROL_MOVE_CHANCE;
pub use crate::body::Body;
pub use crate::enemy::{AiState, Enemy, EnemyKind};
pub use crate::vision::{Terrain, VisionSystem};

/// 表示可以参加战斗的活体
pub trait Combatant {
    /// 显示名称
    fn name(&self) -> &str;

    /// 攻击力
    fn attack_power(&self) -> i32;

    /// 防御力
    fn defense(&self) -> i32;

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn hp(&self) -> i32 {
        self.body().hp
    }

    fn is_alive(&self) -> bool {
        self.body().is_alive()
    }

    fn take_damage(&mut self, amount: i32) {
        self.body_mut().take_damage(amount);
    }
}

/// Handles combat interactions between entities
pub struct Combat;

impl Combat {
    /// Every hit lands for at least this much; there is no miss outcome.
    pub const MIN_DAMAGE: i32 = 1;

    /// `max(1, attack - defense)`
    pub fn damage<A, D>(attacker: &A, defender: &D) -> i32
    where
        A: Combatant + ?Sized,
        D: Combatant + ?Sized,
    {
        (attacker.attack_power() - defender.defense()).max(Self::MIN_DAMAGE)
    }

    /// Applies one hit to `defender` in place and returns the damage dealt.
    pub fn strike<A, D>(attacker: &A, defender: &mut D) -> i32
    where
        A: Combatant + ?Sized,
        D: Combatant + ?Sized,
    {
        let damage = Self::damage(attacker, defender);
        defender.take_damage(damage);
        damage
    }
}
