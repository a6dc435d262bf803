//! Tick Driver
//!
//! One fixed-timestep update of the whole simulation. Order per tick:
//! spawn controller, physics step, contact resolution, game-over check.
//! The driver owns nothing; it wires the pieces together and hands the
//! tick's event batch back to the caller.

use tracing::info;

use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::factory::EntityFactory;
use crate::game::input::InputFrame;
use crate::game::merge::MergeResolver;
use crate::game::physics::PhysicsWorld;
use crate::game::state::{GamePhase, GameState};

/// What one tick produced.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in order of occurrence
    pub events: Vec<GameEvent>,

    /// `true` exactly on the tick the game-over condition fired
    pub game_over: bool,
}

/// Advance the simulation by one tick of `dt` seconds.
///
/// Ticking an ended game is a no-op that returns an empty result.
pub fn tick(
    state: &mut GameState,
    factory: &mut EntityFactory,
    resolver: &MergeResolver,
    world: &mut dyn PhysicsWorld,
    input: &InputFrame,
    config: &GameConfig,
    dt: f32,
) -> TickResult {
    if state.is_ended() {
        return TickResult::default();
    }

    state.tick += 1;

    state.spawner.tick(
        &mut state.registry,
        factory,
        world,
        &mut state.rng,
        &mut state.pending_events,
        input,
        config,
        state.tick,
        dt,
    );

    world.step(dt);

    for contact in world.drain_contacts() {
        resolver.resolve_contact(state, factory, world, contact);
    }

    let fired = state
        .detector
        .tick(&state.registry, world, config, dt);
    if fired {
        state.phase = GamePhase::Ended;
        state.spawner.freeze(world);
        info!(score = state.score, tick = state.tick, "game ended");
        state.push_event(GameEvent::game_over(state.tick, state.score));
    }

    TickResult {
        events: state.take_events(),
        game_over: fired,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::events::GameEventData;
    use crate::game::physics::{testing::TestWorld, BodyMode};

    const DT: f32 = 1.0 / 60.0;

    struct Harness {
        state: GameState,
        factory: EntityFactory,
        resolver: MergeResolver,
        world: TestWorld,
        config: GameConfig,
    }

    impl Harness {
        fn new(seed: u64) -> Self {
            let config = GameConfig::default();
            Self {
                state: GameState::new(seed),
                factory: EntityFactory::new(config.tier_table()),
                resolver: MergeResolver::new(),
                world: TestWorld::new(),
                config,
            }
        }

        fn tick(&mut self, input: InputFrame, dt: f32) -> TickResult {
            tick(
                &mut self.state,
                &mut self.factory,
                &self.resolver,
                &mut self.world,
                &input,
                &self.config,
                dt,
            )
        }

        /// Plant a dropped entity directly, bypassing the spawner.
        fn plant(&mut self, tier: u8, position: Vec2) {
            let e = self
                .factory
                .create_at(&mut self.world, tier, position)
                .unwrap();
            self.world.set_mode(e.body, BodyMode::Dynamic);
            self.state.registry.register(e);
        }
    }

    #[test]
    fn test_tick_advances_counter_and_steps_world() {
        let mut h = Harness::new(1);
        h.tick(InputFrame::default(), DT);
        h.tick(InputFrame::default(), DT);

        assert_eq!(h.state.tick, 2);
        assert_eq!(h.world.steps, 2);
    }

    #[test]
    fn test_contact_resolves_into_merge() {
        let mut h = Harness::new(1);
        h.plant(0, Vec2::new(-0.2, 0.0));
        h.plant(0, Vec2::new(0.2, 0.0));

        let bodies: Vec<_> = h.state.registry.iter().map(|e| e.body).collect();
        h.world.push_contact(bodies[0], bodies[1]);

        let result = h.tick(InputFrame::default(), DT);

        assert_eq!(h.state.score, 2);
        assert_eq!(h.state.registry.count_by_tier(1), 1);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::Merged { .. })));
        assert!(!result.game_over);
    }

    #[test]
    fn test_game_over_flow() {
        let mut h = Harness::new(1);
        h.plant(0, Vec2::new(0.0, 5.0));
        h.state.score = 7;

        // Above the line for one second: not yet
        let r = h.tick(InputFrame::default(), 1.0);
        assert!(!r.game_over);

        // Past the two-second delay: fires
        let r = h.tick(InputFrame::default(), 1.5);
        assert!(r.game_over);
        assert!(h.state.is_ended());
        assert!(h.state.spawner.is_frozen());
        assert!(r
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::GameOver { final_score: 7 })));

        // Ended game: ticking is a no-op
        let tick_before = h.state.tick;
        let r = h.tick(InputFrame::drop_at(0.0), 1.0);
        assert!(r.events.is_empty());
        assert!(!r.game_over);
        assert_eq!(h.state.tick, tick_before);
    }

    #[test]
    fn test_spawner_runs_inside_tick() {
        let mut h = Harness::new(1);

        // First tick spawns an aimed entity
        let r = h.tick(InputFrame::default(), DT);
        assert!(h.state.spawner.aimed().is_some());
        assert!(r
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::Spawned { .. })));

        // Dropping registers it
        let r = h.tick(InputFrame::drop_at(1.0), DT);
        assert_eq!(h.state.registry.count(), 1);
        assert!(r
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::Dropped { .. })));
    }

    #[test]
    fn test_event_streams_are_deterministic() {
        let script = |t: u64| -> InputFrame {
            match t % 40 {
                5 => InputFrame::drop_at((t % 7) as f32 - 3.0),
                _ => InputFrame::aim((t % 11) as f32 - 5.0),
            }
        };

        let run = |seed: u64| -> Vec<GameEvent> {
            let mut h = Harness::new(seed);
            let mut all = Vec::new();
            for t in 0..300 {
                let r = h.tick(script(t), DT);
                all.extend(r.events);
            }
            all
        };

        assert_eq!(run(77), run(77));
    }
}
