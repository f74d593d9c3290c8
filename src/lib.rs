//! A grid-based snake game engine that any front end can drive.
//!
//! [`engine::SnakeEngine`] holds the game and advances it one tick at a time,
//! [`session::Session`] feeds it queued player input and keeps the high score
//! through a [`high_score::HighScoreStore`].

pub mod config;
pub mod engine;
pub mod grid;
pub mod high_score;
pub mod intent;
pub mod session;
pub mod snake;

pub use config::GameConfig;
pub use engine::{Collision, RunState, Snapshot, SnakeEngine, TickEvent};
pub use grid::{Direction, Pos, Size};
pub use high_score::{FileStore, HighScoreStore, MemoryStore};
pub use intent::Intent;
pub use session::Session;
