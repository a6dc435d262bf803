//! Game State
//!
//! Everything one running game owns: the tick counter, phase, score,
//! the live registry, the spawn controller, the game-over detector, and
//! the seeded RNG. Serializable as a whole for checkpointing; pending
//! events are transient and drained every tick, so they are skipped.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::rng::DeterministicRng;
use crate::game::events::GameEvent;
use crate::game::game_over::GameOverDetector;
use crate::game::registry::Registry;
use crate::game::spawn::SpawnController;

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation is running and accepts input
    Playing,
    /// Game over fired; the state is inert
    Ended,
}

/// Complete state of one running game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Ticks elapsed since the game started
    pub tick: u64,

    /// Current lifecycle phase
    pub phase: GamePhase,

    /// Authoritative score accumulator
    pub score: u32,

    /// Highest tier ever produced by a merge this game
    pub highest_achieved: Option<u8>,

    /// Seed this game was started with
    pub rng_seed: u64,

    /// Deterministic RNG for drop-tier selection
    pub rng: DeterministicRng,

    /// Live dropped entities
    pub registry: Registry,

    /// Aimed-entity state machine
    pub spawner: SpawnController,

    /// Debounced end-condition tracker
    pub detector: GameOverDetector,

    /// Events produced this tick, drained by the tick driver
    #[serde(skip)]
    pub(crate) pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game from a seed.
    pub fn new(seed: u64) -> Self {
        info!(seed, "new game");
        Self {
            tick: 0,
            phase: GamePhase::Playing,
            score: 0,
            highest_achieved: None,
            rng_seed: seed,
            rng: DeterministicRng::new(seed),
            registry: Registry::new(),
            spawner: SpawnController::new(),
            detector: GameOverDetector::new(),
            pending_events: Vec::new(),
        }
    }

    /// Award points and return the updated score. Saturates at `u32::MAX`.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Record a merge-produced tier. Returns `true` when it beats the
    /// previous best, which is when the achievement event should fire.
    pub fn note_tier_achieved(&mut self, tier: u8) -> bool {
        if self.highest_achieved.map_or(true, |best| tier > best) {
            self.highest_achieved = Some(tier);
            return true;
        }
        false
    }

    /// Queue an event for this tick's batch.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether the game has ended.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }
}

// =============================================================================
// TESTS
// =============================================================================
