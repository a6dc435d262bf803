//! Game-Over Detection
//!
//! The end condition fires when a dynamic entity stays above the
//! configured line for the full delay window. The debounce exists because
//! freshly dropped objects transiently overshoot the line while settling
//! and must not end the game on a bounce. The aimed kinematic entity is
//! held at the drop line by design and never counts.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::config::GameConfig;
use crate::game::physics::{BodyMode, PhysicsWorld};
use crate::game::registry::Registry;

/// Debounced detector for the terminal game-over condition.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameOverDetector {
    timer: f32,
    triggered: bool,
}

impl GameOverDetector {
    /// Create a detector in its initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds the line has been continuously violated.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Whether the terminal condition has already fired.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Scan the registry once. Returns `true` exactly once, on the tick
    /// the condition fires; `false` forever after.
    pub fn tick(
        &mut self,
        registry: &Registry,
        world: &dyn PhysicsWorld,
        config: &GameConfig,
        dt: f32,
    ) -> bool {
        if self.triggered {
            return false;
        }

        let above_line = registry.iter().any(|e| {
            world
                .position(e.body)
                .is_some_and(|p| p.y > config.game_over_line_y)
                && world.mode(e.body) == Some(BodyMode::Dynamic)
        });

        if above_line {
            self.timer += dt;
            if self.timer >= config.game_over_delay {
                self.triggered = true;
                info!("Game over: entity above y={} for {:.1}s", config.game_over_line_y, self.timer);
                return true;
            }
        } else {
            self.timer = 0.0;
        }

        false
    }
}

// =============================================================================
// TESTS
// =============================================================================
