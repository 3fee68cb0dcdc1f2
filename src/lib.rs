//! Deep Delve: a turn-based dungeon crawl simulation core.
//!
//! The root crate owns the [`Session`] (turn engine), configuration, the
//! seedable RNG, the command set, display snapshots and the mapping to and
//! from save documents. Level generation, combat, the hero and persistence
//! live in the workspace crates re-exported below.

pub mod command;
pub mod config;
pub mod persistence;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use combat;
pub use dungeon;
pub use error::{self, GameError};
pub use hero;
pub use items;
pub use save;

pub use crate::command::{Command, Direction};
pub use crate::config::GameConfig;
pub use crate::rng::GameRng;
pub use crate::session::{MessageLog, Session, TurnOutcome};
pub use crate::snapshot::{StateSnapshot, TileView, format_playtime};
