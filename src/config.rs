use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};

use crate::grid::Size;

pub const DEFAULT_WIDTH: u16 = 32;
pub const DEFAULT_HEIGHT: u16 = 24;
pub const DEFAULT_INITIAL_LENGTH: u16 = 6;
/// Largest grid accepted, in cells. Apple placement may scan the whole grid.
pub const MAX_CELLS: usize = 65_536;
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);
pub const HIGH_SCORE_FILE: &str = "highscore.txt";
pub const LOG_FILE: &str = "snekgrid.log";

/// Everything needed to set up a game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Grid width in cells
    pub width: u16,
    /// Grid height in cells
    pub height: u16,
    /// Snake length at the start of every game
    pub initial_length: u16,
    /// Time between two ticks
    pub tick_rate: Duration,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_length: DEFAULT_INITIAL_LENGTH,
            tick_rate: DEFAULT_TICK_RATE,
            high_score_path: PathBuf::from(HIGH_SCORE_FILE),
            log_path: PathBuf::from(LOG_FILE),
        }
    }
}

impl GameConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_initial_length(mut self, initial_length: u16) -> Self {
        self.initial_length = initial_length;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.size().cell_count() <= MAX_CELLS,
            "grid {}x{} exceeds {} cells",
            self.width,
            self.height,
            MAX_CELLS
        );
        ensure!(self.initial_length > 0, "initial snake length must be positive");
        ensure!(
            self.initial_length <= self.width,
            "initial snake length {} does not fit in a grid {} cells wide",
            self.initial_length,
            self.width
        );
        ensure!(!self.tick_rate.is_zero(), "tick rate must be positive");
        Ok(())
    }
}
