//! Game Events
//!
//! Events generated during simulation, drained once per tick. They are
//! the fire-and-forget channel toward the display layer: the core never
//! reads UI state back.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::vec2::Vec2;
use crate::game::entity::EntityId;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A new aimed entity was created by the spawn controller.
    Spawned {
        /// New entity id
        id: EntityId,
        /// Its tier
        tier: u8,
    },

    /// The aimed entity was released into the simulation.
    Dropped {
        /// Released entity id
        id: EntityId,
        /// Its tier
        tier: u8,
    },

    /// Two equal-tier entities merged into one of the next tier.
    Merged {
        /// Tier of the two consumed entities
        source_tier: u8,
        /// Tier of the spawned product
        result_tier: u8,
        /// Id of the spawned product
        result_id: EntityId,
        /// Points awarded (sum of both sources' point values)
        points: u32,
        /// Score accumulator after the award
        new_score: u32,
        /// Midpoint where the product spawned
        position: Vec2,
    },

    /// Two terminal-tier entities touched; no merge is possible.
    MaxTierReached {
        /// The terminal tier
        tier: u8,
    },

    /// Both sources were consumed but the next tier has no definition.
    MergeSpawnFailed {
        /// The missing tier
        tier: u8,
        /// Points still awarded for the consumed pair
        points: u32,
    },

    /// A merge produced a tier higher than any achieved before.
    HighestTierAchieved {
        /// The new highest tier
        tier: u8,
        /// Its display name
        name: String,
    },

    /// The game-over condition fired.
    GameOver {
        /// Final score
        final_score: u32,
    },
}

/// A game event with the tick it occurred on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u64,

    /// Event payload
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create a spawned event.
    pub fn spawned(tick: u64, id: EntityId, tier: u8) -> Self {
        Self::new(tick, GameEventData::Spawned { id, tier })
    }

    /// Create a dropped event.
    pub fn dropped(tick: u64, id: EntityId, tier: u8) -> Self {
        Self::new(tick, GameEventData::Dropped { id, tier })
    }

    /// Create a max-tier-reached event.
    pub fn max_tier_reached(tick: u64, tier: u8) -> Self {
        Self::new(tick, GameEventData::MaxTierReached { tier })
    }

    /// Create a game-over event.
    pub fn game_over(tick: u64, final_score: u32) -> Self {
        Self::new(tick, GameEventData::GameOver { final_score })
    }
}

// =============================================================================
// SCORE / DISPLAY SINK
// =============================================================================

/// Fire-and-forget notifications toward the score display.
///
/// The core owns the authoritative score; a sink only mirrors it for
/// presentation and is never read back.
pub trait ScoreSink {
    /// Points were awarded by a merge.
    fn add_score(&mut self, points: u32);

    /// A new highest tier was achieved.
    fn update_highest_achieved(&mut self, name: &str);

    /// The game ended; show a final summary.
    fn show_game_over(&mut self, final_score: u32);
}

/// Default sink that logs score traffic, standing in for a score UI.
#[derive(Debug, Default)]
pub struct TracingScoreSink {
    shown: u32,
}

impl ScoreSink for TracingScoreSink {
    fn add_score(&mut self, points: u32) {
        self.shown = self.shown.saturating_add(points);
        info!("Score: {} (+{})", self.shown, points);
    }

    fn update_highest_achieved(&mut self, name: &str) {
        info!("Best: {name}");
    }

    fn show_game_over(&mut self, final_score: u32) {
        info!("Game Over! Score: {final_score}");
    }
}

/// Forward one tick's event batch to a display sink.
pub fn forward_events(events: &[GameEvent], sink: &mut dyn ScoreSink) {
    for event in events {
        match &event.data {
            GameEventData::Merged { points, .. } => sink.add_score(*points),
            GameEventData::MergeSpawnFailed { points, .. } => sink.add_score(*points),
            GameEventData::HighestTierAchieved { name, .. } => {
                sink.update_highest_achieved(name)
            }
            GameEventData::GameOver { final_score } => sink.show_game_over(*final_score),
            _ => {}
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
