//! Spawn Controller
//!
//! Governs the single aimed entity: spawn at the drop line, follow the
//! aim axis while kinematic, release into the simulation on the drop
//! trigger, then wait out the cooldown before offering the next one.
//!
//! State machine: Aiming -> Cooldown -> Aiming -> ... -> Frozen
//! (Frozen on game over, terminal). The controller starts with an
//! expired cooldown so the first tick produces the first aimed entity.

use serde::{Deserialize, Serialize};

use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::config::GameConfig;
use crate::game::entity::MergeEntity;
use crate::game::events::GameEvent;
use crate::game::factory::EntityFactory;
use crate::game::input::InputFrame;
use crate::game::physics::{BodyMode, PhysicsWorld};
use crate::game::registry::Registry;

/// Owns and steers the currently aimed, not-yet-dropped entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnController {
    /// Aimed entity; `None` during cooldown and after freezing
    current: Option<MergeEntity>,
    aim_x: f32,
    cooldown_timer: f32,
    frozen: bool,
}

impl Default for SpawnController {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnController {
    /// Create a controller aiming at center, ready to spawn immediately.
    pub fn new() -> Self {
        Self {
            current: None,
            aim_x: 0.0,
            cooldown_timer: 0.0,
            frozen: false,
        }
    }

    /// The aimed entity, if one is currently held.
    pub fn aimed(&self) -> Option<&MergeEntity> {
        self.current.as_ref()
    }

    /// Current clamped aim position.
    pub fn aim_x(&self) -> f32 {
        self.aim_x
    }

    /// Whether the controller has been frozen by game over.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Seconds left before the next entity can spawn.
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_timer.max(0.0)
    }

    /// Advance one tick: run the cooldown, or aim/position/drop the held
    /// entity. A tick that spawns a new entity does not also process the
    /// drop trigger; the first drop opportunity is the following tick.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        registry: &mut Registry,
        factory: &mut EntityFactory,
        world: &mut dyn PhysicsWorld,
        rng: &mut DeterministicRng,
        events: &mut Vec<GameEvent>,
        input: &InputFrame,
        config: &GameConfig,
        tick: u64,
        dt: f32,
    ) {
        if self.frozen {
            return;
        }

        if self.current.is_none() {
            self.cooldown_timer -= dt;
            if self.cooldown_timer <= 0.0 {
                self.spawn_next(factory, world, rng, events, config, tick);
            }
            return;
        }

        // Aiming: track input within the container bounds
        self.aim_x = input.aim_x.clamp(config.aim_min_x, config.aim_max_x);
        let hold = Vec2::new(self.aim_x, config.drop_line_y);
        if let Some(e) = &self.current {
            world.set_position(e.body, hold);
        }

        if input.drop {
            if let Some(e) = self.current.take() {
                world.set_mode(e.body, BodyMode::Dynamic);
                events.push(GameEvent::dropped(tick, e.id, e.tier));
                registry.register(e);
                self.cooldown_timer = config.drop_cooldown;
            }
        }
    }

    /// Create the next aimed entity at a uniformly random droppable tier.
    fn spawn_next(
        &mut self,
        factory: &mut EntityFactory,
        world: &mut dyn PhysicsWorld,
        rng: &mut DeterministicRng,
        events: &mut Vec<GameEvent>,
        config: &GameConfig,
        tick: u64,
    ) {
        // Nothing droppable without at least one configured tier
        let Some(max_configured) = factory.max_configured_tier() else {
            return;
        };
        let max_drop = config.max_drop_tier.min(max_configured);
        let tier = rng.next_int(max_drop as u32 + 1) as u8;

        let hold = Vec2::new(self.aim_x, config.drop_line_y);
        // Factory failures were already logged; keep waiting in that case
        if let Ok(e) = factory.create_at(world, tier, hold) {
            events.push(GameEvent::spawned(tick, e.id, e.tier));
            self.current = Some(e);
        }
    }

    /// Game-over notification: discard any held entity, ignore all
    /// further input. Terminal.
    pub fn freeze(&mut self, world: &mut dyn PhysicsWorld) {
        if let Some(e) = self.current.take() {
            world.destroy_body(e.body);
        }
        self.frozen = true;
    }
}

// =============================================================================
// TESTS
// =============================================================================
