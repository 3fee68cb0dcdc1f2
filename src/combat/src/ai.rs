// src/combat/src/ai.rs
//! Two-state enemy controller: patrol until the player is sighted, then
//! chase the last sighted coordinate.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::enemy::{AiState, Enemy};
use crate::vision::{Terrain, VisionSystem};

/// Chance per turn that a patrolling enemy takes a random step.
pub const PATROL_MOVE_CHANCE: f64 = 0.3;

const CARDINALS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

impl Enemy {
    /// Sight check: distance gate plus line trace.
    pub fn can_see<T>(&self, target: (i32, i32), terrain: &T, radius: u32) -> bool
    where
        T: Terrain + ?Sized,
    {
        VisionSystem::can_see(terrain, self.position(), target, radius)
    }

    /// 执行一次AI决策
    ///
    /// `is_open` answers whether a cell may be entered this turn (walkable and
    /// unoccupied). Returns whether the enemy moved.
    pub fn take_turn<T, F, R>(
        &mut self,
        player: (i32, i32),
        terrain: &T,
        sight_radius: u32,
        is_open: F,
        rng: &mut R,
    ) -> bool
    where
        T: Terrain + ?Sized,
        F: Fn(i32, i32) -> bool,
        R: Rng + ?Sized,
    {
        // 目标只在看见玩家时刷新
        if self.can_see(player, terrain, sight_radius) {
            if self.ai_state != AiState::Chase {
                log::debug!("{} at {:?} spots the player", self.name, self.position());
            }
            self.ai_state = AiState::Chase;
            self.target = Some(player);
        }

        match (self.ai_state, self.target) {
            (AiState::Chase, Some(target)) => self.chase_step(target, &is_open),
            _ => self.patrol_step(&is_open, rng),
        }
    }

    fn chase_step<F>(&mut self, target: (i32, i32), is_open: &F) -> bool
    where
        F: Fn(i32, i32) -> bool,
    {
        let dx = (target.0 - self.body.x).signum();
        let dy = (target.1 - self.body.y).signum();

        if dx == 0 && dy == 0 {
            // 到达最后已知位置，恢复巡逻
            self.ai_state = AiState::Patrol;
            self.target = None;
            return false;
        }

        let moved = self.try_step(dx, dy, is_open)
            || (dx != 0 && self.try_step(dx, 0, is_open))
            || (dy != 0 && self.try_step(0, dy, is_open));

        if self.target == Some(self.position()) {
            self.ai_state = AiState::Patrol;
            self.target = None;
        }
        moved
    }

    fn patrol_step<F, R>(&mut self, is_open: &F, rng: &mut R) -> bool
    where
        F: Fn(i32, i32) -> bool,
        R: Rng + ?Sized,
    {
        if !rng.random_bool(PATROL_MOVE_CHANCE) {
            return false;
        }
        match CARDINALS.choose(rng) {
            Some(&(dx, dy)) => self.try_step(dx, dy, is_open),
            None => false,
        }
    }

    fn try_step<F>(&mut self, dx: i32, dy: i32, is_open: &F) -> bool
    where
        F: Fn(i32, i32) -> bool,
    {
        let (nx, ny) = (self.body.x + dx, self.body.y + dy);
        if is_open(nx, ny) {
            self.body.set_position(nx, ny);
            true
        } else {
            false
        }
    }
}
