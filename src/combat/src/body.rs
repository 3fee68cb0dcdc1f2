// src/combat/src/body.rs

use items::Color;
use serde::{Deserialize, Serialize};

/// Fields every living entity carries, player and enemy alike.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub color: Color,
    pub hp: i32,
    pub max_hp: i32,
}

impl Body {
    /// 以满血状态创建
    pub fn new(x: i32, y: i32, glyph: char, color: Color, hp: i32) -> Self {
        Self {
            x,
            y,
            glyph,
            color,
            hp,
            max_hp: hp,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// 受到伤害(生命值不低于0)
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    /// 治疗(不超过最大生命值)，返回实际恢复量
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Manhattan distance to `(x, y)`.
    pub fn manhattan_to(&self, x: i32, y: i32) -> i32 {
        (self.x - x).abs() + (self.y - y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_is_capped_at_max_hp() {
        let mut body = Body::new(0, 0, '@', (255, 255, 255), 100);
        body.take_damage(40);
        assert_eq!(body.heal(30), 30);
        assert_eq!(body.heal(30), 10);
        assert_eq!(body.hp, 100);
    }

    #[test]
    fn manhattan_distance() {
        let body = Body::new(2, 3, 'r', (0, 0, 0), 1);
        assert_eq!(body.manhattan_to(3, 3), 1);
        assert_eq!(body.manhattan_to(3, 4), 2);
        assert_eq!(body.manhattan_to(2, 3), 0);
    }
}
