// src/dungeon/src/level/rooms.rs
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 矩形房间，仅用于生成与特殊布置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 获取房间中心点
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// 检查房间是否与另一个房间相交(边缘相接也算相交)
    pub fn intersects(&self, other: &Self) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }

    /// Whether `(x, y)` lies inside the carved rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// 获取房间内的随机点(不贴墙)
    pub fn random_interior_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (i32, i32) {
        let x = rng.random_range(self.x + 1..=(self.x + self.width - 2).max(self.x + 1));
        let y = rng.random_range(self.y + 1..=(self.y + self.height - 2).max(self.y + 1));
        (x, y)
    }
}
