//src/dungeon/src/lib.rs
//! 地牢：网格与视野、房间、楼层生成与楼层主题。

pub mod director;
pub mod generator;
pub mod level;

pub use director::{LevelDirector, SpecialFeatures};
pub use generator::DungeonGenerator;
pub use level::rooms::Room;
pub use level::tiles::{Grid, Tile};
pub use level::{Feature, Level};
