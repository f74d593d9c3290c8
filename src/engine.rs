use std::collections::VecDeque;

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::grid::{Direction, Pos, Size};
use crate::intent::Intent;
use crate::snake::Snake;

/// Random guesses at a free apple cell before scanning the whole grid.
const SPAWN_ATTEMPTS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    GameOver,
}

/// What the snake ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// The outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    Moved,
    AteApple,
    Collided(Collision),
    /// Nothing happened, the game is paused.
    Paused,
    /// Nothing happened, the game is already over.
    Halted,
}

impl TickEvent {
    pub fn ate_apple(&self) -> bool {
        matches!(self, TickEvent::AteApple)
    }

    pub fn collided(&self) -> bool {
        matches!(self, TickEvent::Collided(_))
    }
}

/// A read-only view of the game for renderers.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub size: Size,
    /// Head first.
    pub snake: &'a VecDeque<Pos>,
    pub apple: Pos,
    pub score: u32,
    pub heading: Direction,
    pub run_state: RunState,
}

/// Owns the authoritative state of one game of snake and advances it a tick
/// at a time. Knows nothing about rendering, input devices or storage.
#[derive(Debug)]
pub struct SnakeEngine {
    size: Size,
    initial_length: u16,
    snake: Snake,
    apple: Pos,
    score: u32,
    run_state: RunState,
    rng: StdRng,
}

impl SnakeEngine {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as `new`, with reproducible apple placement.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let size = config.size();
        let mut engine = SnakeEngine {
            size,
            initial_length: config.initial_length,
            snake: Snake::new(size, config.initial_length),
            apple: Pos::new(0, 0),
            score: 0,
            run_state: RunState::Running,
            rng,
        };
        engine.initialize();
        Ok(engine)
    }

    /// Starts a fresh game: snake back at its starting spot facing right,
    /// score zeroed, new apple, running.
    pub fn initialize(&mut self) {
        self.snake = Snake::new(self.size, self.initial_length);
        self.score = 0;
        self.apple = self.spawn_apple();
        self.run_state = RunState::Running;
        info!(
            "New game on a {}x{} grid, snake length {}",
            self.size.width, self.size.height, self.initial_length
        );
    }

    /// Queues a turn for the next tick. Reversals of the last step taken are
    /// silently dropped.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.run_state == RunState::GameOver {
            return false;
        }
        self.snake.change_direction(direction)
    }

    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = RunState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.run_state != RunState::Paused {
            return false;
        }
        self.run_state = RunState::Running;
        true
    }

    /// Starts over from Paused or GameOver. Does nothing mid-game.
    pub fn restart(&mut self) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }
        self.initialize();
        true
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::SetDirection(direction) => {
                self.set_direction(direction);
            }
            Intent::Pause => {
                self.pause();
            }
            Intent::Resume => {
                self.resume();
            }
            Intent::TogglePause => match self.run_state {
                RunState::Running => {
                    self.pause();
                }
                RunState::Paused => {
                    self.resume();
                }
                RunState::GameOver => {
                    self.restart();
                }
            },
            Intent::Restart => {
                self.restart();
            }
        }
    }

    /// Advances the game one cell.
    pub fn tick(&mut self) -> TickEvent {
        match self.run_state {
            RunState::Running => {}
            RunState::Paused => return TickEvent::Paused,
            RunState::GameOver => return TickEvent::Halted,
        }

        let Some(new_head) = self.snake.next_head(self.size) else {
            return self.game_over(Collision::Wall);
        };

        let ate_apple = new_head == self.apple;
        self.snake.slither(new_head, ate_apple);

        if ate_apple {
            self.score += 1;
            self.apple = self.spawn_apple();
            debug!(
                "Apple eaten at ({}, {}), score {}, next apple at ({}, {})",
                new_head.x, new_head.y, self.score, self.apple.x, self.apple.y
            );
        }

        // The tail has already moved out of the way unless we grew.
        if self.snake.bites_itself() {
            return self.game_over(Collision::Body);
        }

        if ate_apple {
            TickEvent::AteApple
        } else {
            TickEvent::Moved
        }
    }

    fn game_over(&mut self, collision: Collision) -> TickEvent {
        self.run_state = RunState::GameOver;
        info!(
            "Game over ({:?} collision) with score {}",
            collision, self.score
        );
        TickEvent::Collided(collision)
    }

    /// Picks a random free cell. If the snake covers the whole grid there is
    /// no such cell and any cell will do.
    fn spawn_apple(&mut self) -> Pos {
        // Guessing is cheap while most of the grid is free
        if self.snake.len() * 2 <= self.size.cell_count() {
            for _ in 0..SPAWN_ATTEMPTS {
                let pos = Pos {
                    x: self.rng.gen_range(0..self.size.width),
                    y: self.rng.gen_range(0..self.size.height),
                };
                if !self.snake.occupies(pos) {
                    return pos;
                }
            }
        }

        let snake = &self.snake;
        let free: Vec<Pos> = self
            .size
            .cells()
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        match free.choose(&mut self.rng) {
            Some(pos) => *pos,
            None => Pos {
                x: self.rng.gen_range(0..self.size.width),
                y: self.rng.gen_range(0..self.size.height),
            },
        }
    }

    /// Puts the apple on a given cell, off-grid cells are ignored.
    pub fn place_apple(&mut self, pos: Pos) {
        if self.size.contains(pos) {
            self.apple = pos;
        }
    }

    pub fn current_state(&self) -> Snapshot<'_> {
        Snapshot {
            size: self.size,
            snake: self.snake.body(),
            apple: self.apple,
            score: self.score,
            heading: self.snake.heading(),
            run_state: self.run_state,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn body_parts(&self) -> usize {
        self.snake.len()
    }

    pub fn apple(&self) -> Pos {
        self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// The direction the next tick will move in. Requests are checked
    /// against [`heading`](Self::heading), not against this, so it can
    /// change to its own reverse before the snake has turned.
    pub fn next_direction(&self) -> Direction {
        self.snake.next_heading()
    }

    /// The direction of the last step. A request for its reverse is ignored.
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }
}
