//! Turn engine: resolves one player command followed by the enemy phase.
//!
//! A `Session` owns the current level, the player, the shared RNG and the
//! message log. Commands are processed synchronously and to completion;
//! terminal states (`Dead`, `Won`) ignore every further command.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use combat::{Combatant, Terrain};
use dungeon::{Level, LevelDirector};
use error::GameError;
use hero::Hero;
use save::{QUICKSAVE_SLOT, RunState, SaveSystem};

use crate::command::{Command, Direction};
use crate::config::GameConfig;
use crate::rng::GameRng;

/// Depth jump of a magic portal.
pub const PORTAL_JUMP: u32 = 5;

/// 玩家可见的消息日志(保留最近若干条)
#[derive(Clone, Debug, PartialEq)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
    pushed: u64,
}

impl MessageLog {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            pushed: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        self.pushed += 1;
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// 最后 `n` 条，按时间顺序
    pub fn tail(&self, n: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).cloned().collect()
    }

    /// Lines ever pushed, including those that rolled off.
    pub fn total(&self) -> u64 {
        self.pushed
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// What a single command did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// 终局状态下的命令不做任何事
    Ignored,
    /// Reported through the log only; the enemy phase did not run.
    NoTime,
    /// 玩家行动后敌人也行动了
    TurnTaken,
    /// A new level was generated at this depth.
    DepthChanged(u32),
    Won,
    Died,
}

pub struct Session {
    pub(crate) config: GameConfig,
    pub(crate) player: Hero,
    pub(crate) level: Level,
    pub(crate) depth: u32,
    pub(crate) state: RunState,
    pub(crate) messages: MessageLog,
    pub(crate) rng: GameRng,
    pub(crate) saves: SaveSystem,
    pub(crate) turns: u64,
    /// 读档前累计的游戏时长
    pub(crate) playtime_base: Duration,
    pub(crate) started: Instant,
}

impl Session {
    /// 新开一局：生成第一层并放置玩家
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::info!("new run with seed {}", rng.seed());

        let saves = SaveSystem::new(config.save_dir.clone());
        let level = Level::new(config.map_width, config.map_height, 1);
        let mut session = Self {
            config,
            player: Hero::new(0, 0),
            level,
            depth: 1,
            state: RunState::Playing,
            messages: MessageLog::default(),
            rng,
            saves,
            turns: 0,
            playtime_base: Duration::ZERO,
            started: Instant::now(),
        };
        session.enter_depth(1);
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Hero {
        &self.player
    }

    /// Direct access for scripted scenarios and tooling.
    pub fn player_mut(&mut self) -> &mut Hero {
        &mut self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Direct access for scripted scenarios and tooling.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn save_system(&self) -> &SaveSystem {
        &self.saves
    }

    /// 累计游戏时长(秒)
    pub fn playtime_secs(&self) -> u64 {
        (self.playtime_base + self.started.elapsed()).as_secs()
    }

    /// Recomputes the field of view from the player's position.
    pub fn refresh_fov(&mut self) {
        self.level
            .grid
            .compute_field_of_view(self.player.position(), self.config.fov_radius);
    }

    /// 处理一条玩家命令
    pub fn handle_command(&mut self, command: Command) -> TurnOutcome {
        if self.state != RunState::Playing {
            return TurnOutcome::Ignored;
        }

        match command {
            Command::Move(direction) => {
                self.move_or_attack(direction);
                self.finish_turn()
            }
            Command::Wait => self.finish_turn(),
            Command::PickUp => self.pick_up(),
            Command::Descend => self.descend(),
            Command::Ascend => self.ascend(),
            Command::UsePortal => self.use_portal(),
            Command::QuickSave => {
                self.quick_save();
                TurnOutcome::NoTime
            }
        }
    }

    fn move_or_attack(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        let (px, py) = self.player.position();
        let (nx, ny) = (px + dx, py + dy);

        let Some(index) = self.level.enemy_index_at(nx, ny) else {
            // 撞墙也算一回合
            self.player.move_by(dx, dy, &self.level.grid);
            return;
        };

        let enemy = &mut self.level.enemies[index];
        let damage = self.player.attack_enemy(enemy);
        let name = enemy.name().to_string();
        self.messages.push(format!("You hit {name} for {damage} damage!"));

        if !enemy.is_alive() {
            let exp = enemy.exp_value;
            self.level.enemies.remove(index);
            self.messages.push(format!("{name} dies!"));
            if let Some(level_up) = self.player.gain_exp(exp) {
                self.messages.push(level_up);
            }
        }
    }

    fn pick_up(&mut self) -> TurnOutcome {
        let (x, y) = self.player.position();
        match self.level.take_item_at(x, y) {
            Some(item) => {
                let message = self.player.pick_up(item);
                self.messages.push(message);
                self.finish_turn()
            }
            None => {
                self.messages.push("There's nothing here to pick up.");
                TurnOutcome::NoTime
            }
        }
    }

    fn descend(&mut self) -> TurnOutcome {
        if self.level.stairs_down != Some(self.player.position()) {
            self.messages.push("There are no stairs here.");
            return TurnOutcome::NoTime;
        }
        let depth = self.depth + 1;
        self.messages.push(format!("You descend to level {depth}!"));
        self.enter_depth(depth);
        TurnOutcome::DepthChanged(depth)
    }

    fn ascend(&mut self) -> TurnOutcome {
        if self.level.stairs_up != Some(self.player.position()) {
            self.messages.push("There are no stairs here.");
            return TurnOutcome::NoTime;
        }
        if self.depth <= 1 {
            self.messages.push("You escape the dungeon! You win!");
            self.state = RunState::Won;
            log::info!("run won after {} turns", self.turns);
            return TurnOutcome::Won;
        }
        let depth = self.depth - 1;
        self.messages.push(format!("You ascend to level {depth}!"));
        self.enter_depth(depth);
        TurnOutcome::DepthChanged(depth)
    }

    fn use_portal(&mut self) -> TurnOutcome {
        if self.level.portal != Some(self.player.position()) {
            self.messages.push("There is no portal here.");
            return TurnOutcome::NoTime;
        }
        let depth = self.depth + PORTAL_JUMP;
        self.messages
            .push(format!("The portal transports you to level {depth}!"));
        self.messages
            .push("You feel the magic energy coursing through you!");
        self.enter_depth(depth);
        TurnOutcome::DepthChanged(depth)
    }

    fn quick_save(&mut self) {
        let message = match self.save(Some(QUICKSAVE_SLOT)) {
            Ok(file_name) => format!("Game saved as {file_name}"),
            Err(err) => {
                log::warn!("quick save failed: {err}");
                format!("Failed to save game: {}", error::handle_error(&err))
            }
        };
        self.messages.push(message);
    }

    /// 替换当前楼层并把玩家放到出生点
    pub(crate) fn enter_depth(&mut self, depth: u32) {
        log::info!("entering depth {depth} (from {})", self.depth);
        self.depth = depth;
        self.level = LevelDirector::generate_level(
            self.config.map_width,
            self.config.map_height,
            depth,
            &mut self.rng,
        );
        self.player.place_at(self.level.spawn_point());
        self.player.record_depth(depth);
        self.refresh_fov();
        self.narrate_level_entry();
    }

    fn narrate_level_entry(&mut self) {
        let depth = self.depth;
        self.messages.push(format!(
            "=== {} - Level {depth} ===",
            LevelDirector::theme(depth)
        ));
        self.messages
            .push(LevelDirector::description(depth, &mut self.rng));
        if depth > 1 {
            self.messages
                .push(format!("Deepest level reached: {}", self.player.max_depth));
        }
        for line in LevelDirector::features(depth).announcements() {
            self.messages.push(line);
        }
    }

    fn finish_turn(&mut self) -> TurnOutcome {
        self.enemy_phase();
        self.turns += 1;
        match self.state {
            RunState::Dead => TurnOutcome::Died,
            _ => TurnOutcome::TurnTaken,
        }
    }

    /// 敌人阶段：刷新视野，相邻敌人攻击，其余执行AI
    fn enemy_phase(&mut self) {
        self.refresh_fov();

        // 阶段开始时活着的敌人快照
        let actors: Vec<usize> = self
            .level
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, _)| i)
            .collect();

        for index in actors {
            let player_pos = self.player.position();
            if self.level.enemies[index].body.manhattan_to(player_pos.0, player_pos.1) == 1 {
                self.enemy_attacks(index);
            } else {
                self.enemy_moves(index, player_pos);
            }
        }
    }

    fn enemy_attacks(&mut self, index: usize) {
        let enemy = &self.level.enemies[index];
        let damage = enemy.attack_player(&mut self.player);
        self.messages.push(format!(
            "{} hits {} for {damage} damage!",
            enemy.name(),
            self.player.name()
        ));

        if !self.player.is_alive() && self.state == RunState::Playing {
            self.state = RunState::Dead;
            self.messages.push("You have died!");
            log::info!("player died at depth {} after {} turns", self.depth, self.turns);
        }
    }

    fn enemy_moves(&mut self, index: usize, player_pos: (i32, i32)) {
        let occupied: Vec<(i32, i32)> = self
            .level
            .enemies
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, e)| e.position())
            .collect();

        let grid = &self.level.grid;
        let enemy = &mut self.level.enemies[index];
        enemy.take_turn(
            player_pos,
            grid,
            self.config.enemy_sight_radius,
            |x, y| {
                grid.is_walkable(x, y) && (x, y) != player_pos && !occupied.contains(&(x, y))
            },
            &mut self.rng,
        );
    }
}
