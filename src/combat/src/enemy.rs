// src/combat/src/enemy.rs

use std::str::FromStr;

use error::GameError;
use items::Color;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Body, Combat, Combatant};

/// 敌人实体，包含战斗属性和位置信息
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    #[serde(flatten)]
    pub body: Body,
    pub kind: EnemyKind,
    pub name: String,
    pub attack: i32,
    pub defense: i32,
    pub exp_value: u32,
    pub ai_state: AiState,
    /// Last coordinate the player was seen at while chasing.
    pub target: Option<(i32, i32)>,
}

/// 敌人种类(目录键)
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
pub enum EnemyKind {
    Rat,
    Goblin,
    Orc,
    Troll,
    Dragon,
}

/// 敌人AI状态
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
}

/// 敌人模板的基础属性
#[derive(Debug, PartialEq, Eq)]
pub struct EnemyStats {
    pub name: &'static str,
    pub glyph: char,
    pub color: Color,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub exp_value: u32,
}

static RAT: EnemyStats = EnemyStats {
    name: "Giant Rat",
    glyph: 'r',
    color: (139, 69, 19),
    hp: 15,
    attack: 5,
    defense: 1,
    exp_value: 10,
};

static GOBLIN: EnemyStats = EnemyStats {
    name: "Goblin",
    glyph: 'g',
    color: (0, 128, 0),
    hp: 25,
    attack: 8,
    defense: 2,
    exp_value: 20,
};

static ORC: EnemyStats = EnemyStats {
    name: "Orc",
    glyph: 'O',
    color: (0, 100, 0),
    hp: 40,
    attack: 12,
    defense: 4,
    exp_value: 35,
};

static TROLL: EnemyStats = EnemyStats {
    name: "Troll",
    glyph: 'T',
    color: (0, 80, 0),
    hp: 60,
    attack: 15,
    defense: 6,
    exp_value: 50,
};

static DRAGON: EnemyStats = EnemyStats {
    name: "Dragon",
    glyph: 'D',
    color: (255, 0, 0),
    hp: 100,
    attack: 25,
    defense: 10,
    exp_value: 100,
};

impl EnemyKind {
    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Rat => &RAT,
            EnemyKind::Goblin => &GOBLIN,
            EnemyKind::Orc => &ORC,
            EnemyKind::Troll => &TROLL,
            EnemyKind::Dragon => &DRAGON,
        }
    }

    /// Exact-match lookup; an unknown key is a catalog bug.
    pub fn from_key(key: &str) -> Result<Self, GameError> {
        EnemyKind::from_str(key).map_err(|_| GameError::unknown_key("enemy", key))
    }

    /// 按深度划分的刷怪权重表
    pub fn spawn_table(depth: u32) -> &'static [(EnemyKind, f64)] {
        use EnemyKind::*;
        match depth {
            0..=2 => &[(Rat, 0.7), (Goblin, 0.3)],
            3..=5 => &[(Rat, 0.3), (Goblin, 0.5), (Orc, 0.2)],
            6..=10 => &[(Goblin, 0.2), (Orc, 0.6), (Troll, 0.2)],
            11..=15 => &[(Orc, 0.3), (Troll, 0.5), (Dragon, 0.2)],
            _ => &[(Troll, 0.4), (Dragon, 0.6)],
        }
    }
}

impl Enemy {
    /// 按模板创建敌人
    pub fn new(kind: EnemyKind, x: i32, y: i32) -> Self {
        let stats = kind.stats();
        Self {
            body: Body::new(x, y, stats.glyph, stats.color, stats.hp),
            kind,
            name: stats.name.to_string(),
            attack: stats.attack,
            defense: stats.defense,
            exp_value: stats.exp_value,
            ai_state: AiState::Patrol,
            target: None,
        }
    }

    /// 按目录键创建敌人，未知键返回错误
    pub fn spawn(key: &str, x: i32, y: i32) -> Result<Self, GameError> {
        Ok(Self::new(EnemyKind::from_key(key)?, x, y))
    }

    pub fn position(&self) -> (i32, i32) {
        self.body.position()
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.body.is_at(x, y)
    }

    /// Scales hp, attack, defense and experience by `multiplier`, truncating.
    /// `max_hp` mirrors the scaled hp.
    pub fn scale(&mut self, multiplier: f64) {
        self.scale_each(multiplier, multiplier, multiplier, multiplier);
    }

    fn scale_each(&mut self, hp: f64, attack: f64, defense: f64, exp: f64) {
        self.body.hp = (self.body.hp as f64 * hp) as i32;
        self.body.max_hp = self.body.hp;
        self.attack = (self.attack as f64 * attack) as i32;
        self.defense = (self.defense as f64 * defense) as i32;
        self.exp_value = (self.exp_value as f64 * exp) as u32;
    }

    /// 强化为首领
    pub fn promote_to_boss(&mut self) {
        self.scale_each(2.5, 1.8, 1.5, 3.0);
        self.name = format!("Boss {}", self.name);
    }

    /// 攻击玩家，返回造成的伤害
    pub fn attack_player<T: Combatant + ?Sized>(&self, player: &mut T) -> i32 {
        Combat::strike(self, player)
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
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

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_enemy_creation() {
        let rat = Enemy::new(EnemyKind::Rat, 0, 0);
        assert_eq!(rat.body.hp, 15);
        assert_eq!(rat.attack, 5);
        assert_eq!(rat.body.glyph, 'r');
        assert_eq!(rat.ai_state, AiState::Patrol);

        let dragon = Enemy::new(EnemyKind::Dragon, 0, 0);
        assert_eq!(dragon.body.max_hp, 100);
        assert_eq!(dragon.defense, 10);
    }

    #[test]
    fn spawn_by_key() {
        let orc = Enemy::spawn("orc", 4, 5).unwrap();
        assert_eq!(orc.name, "Orc");
        assert_eq!(orc.position(), (4, 5));

        let err = Enemy::spawn("kraken", 0, 0).unwrap_err();
        assert!(matches!(
            err,
            GameError::UnknownCatalogKey { category: "enemy", .. }
        ));
    }

    #[test]
    fn depth_scaling_truncates() {
        // depth 4 => 1 + 3 * 0.2 = 1.6
        let mut goblin = Enemy::new(EnemyKind::Goblin, 0, 0);
        goblin.scale(1.6);
        assert_eq!(goblin.body.hp, 40);
        assert_eq!(goblin.body.max_hp, 40);
        assert_eq!(goblin.attack, 12);
        assert_eq!(goblin.defense, 3);
        assert_eq!(goblin.exp_value, 32);
    }

    #[test]
    fn boss_promotion() {
        let mut troll = Enemy::new(EnemyKind::Troll, 0, 0);
        troll.promote_to_boss();
        assert_eq!(troll.name, "Boss Troll");
        assert_eq!(troll.body.hp, 150);
        assert_eq!(troll.body.max_hp, 150);
        assert_eq!(troll.attack, 27);
        assert_eq!(troll.defense, 9);
        assert_eq!(troll.exp_value, 150);
    }

    #[test]
    fn spawn_tables_are_normalised() {
        for depth in [1, 2, 3, 5, 6, 10, 11, 15, 16, 40] {
            let total: f64 = EnemyKind::spawn_table(depth).iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "depth {depth} sums to {total}");
        }
    }

    #[test]
    fn every_kind_has_a_key() {
        for kind in EnemyKind::iter() {
            let key: &'static str = kind.into();
            assert_eq!(EnemyKind::from_key(key).unwrap(), kind);
        }
    }
}
