use crate::engine::{RunState, Snapshot, SnakeEngine, TickEvent};
use crate::high_score::{self, HighScoreStore};
use crate::intent::{Intent, IntentQueue};

/// One player's run of games: the engine, the input waiting to be applied,
/// and the high score.
pub struct Session<S: HighScoreStore> {
    engine: SnakeEngine,
    intents: IntentQueue,
    store: S,
    high_score: u32,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(engine: SnakeEngine, store: S) -> Self {
        let high_score = store.read();
        Session {
            engine,
            intents: IntentQueue::new(),
            store,
            high_score,
        }
    }

    /// Queues input; it takes effect at the start of the next tick.
    pub fn push(&mut self, intent: impl Into<Intent>) {
        self.intents.push(intent);
    }

    /// Applies queued input, advances the engine, and records the score when
    /// the game ends.
    pub fn tick(&mut self) -> TickEvent {
        for intent in self.intents.drain() {
            self.engine.apply(intent);
        }

        let event = self.engine.tick();
        if event.collided() {
            self.high_score = high_score::record_score(&mut self.store, self.engine.score());
        }
        event
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.engine.current_state()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn run_state(&self) -> RunState {
        self.engine.run_state()
    }

    pub fn engine(&self) -> &SnakeEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SnakeEngine {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
