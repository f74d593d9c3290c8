use std::collections::VecDeque;

use crate::grid::Direction;

/// A player request waiting for the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    SetDirection(Direction),
    Pause,
    Resume,
    /// Pause when running, resume when paused, restart after game over.
    TogglePause,
    Restart,
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        Intent::SetDirection(direction)
    }
}

/// Intents in arrival order. Input handlers push, the tick drains.
#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: impl Into<Intent>) {
        self.pending.push_back(intent.into());
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.pending.drain(..)
    }
}
