//! Merge Resolution
//!
//! Turns physics contacts into merges. When two live entities of the same
//! tier touch, both are consumed and one entity of the next tier spawns at
//! their midpoint. The one-shot merge claim on each entity guarantees a
//! body participates in at most one merge per contact batch, no matter how
//! many contact events the engine reports for it.
//!
//! Scoring is committed before the product spawn is attempted. A pair
//! whose next tier turns out to be unconfigured is still consumed and
//! still scores; only the product is missing (reported via
//! [`GameEventData::MergeSpawnFailed`]).

use std::collections::BTreeMap;

use tracing::debug;

use crate::game::entity::MergeEntity;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::factory::EntityFactory;
use crate::game::physics::{BodyMode, ContactEvent, PhysicsWorld};
use crate::game::state::GameState;
use crate::game::tier::TierDefinition;

/// Callback fired for each entity consumed by a merge, before it is
/// removed. Receives the entity and its tier definition.
pub type MergeHook = fn(&MergeEntity, &TierDefinition);

fn default_hook(_entity: &MergeEntity, def: &TierDefinition) {
    debug!("{} is merging!", def.name);
}

/// Resolves contact events into merges against a [`GameState`].
#[derive(Debug, Default)]
pub struct MergeResolver {
    /// Per-tier hook overrides; tiers without an entry use the default
    hooks: BTreeMap<u8, MergeHook>,
}

impl MergeResolver {
    /// Create a resolver with the default hook for every tier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the merge hook for one tier.
    pub fn set_hook(&mut self, tier: u8, hook: MergeHook) {
        self.hooks.insert(tier, hook);
    }

    fn hook_for(&self, tier: u8) -> MergeHook {
        self.hooks.get(&tier).copied().unwrap_or(default_hook)
    }

    /// Process one contact event. No-ops silently on anything that is not
    /// a valid merge pair: stale handles, unregistered bodies,
    /// self-contact, mismatched tiers, or already-claimed entities.
    pub fn resolve_contact(
        &self,
        state: &mut GameState,
        factory: &mut EntityFactory,
        world: &mut dyn PhysicsWorld,
        contact: ContactEvent,
    ) {
        let (Some(id_a), Some(id_b)) = (
            state.registry.id_by_body(contact.a),
            state.registry.id_by_body(contact.b),
        ) else {
            return;
        };
        if id_a == id_b {
            return;
        }

        let (Some(a), Some(b)) = (state.registry.get(id_a), state.registry.get(id_b)) else {
            return;
        };
        if a.tier != b.tier || a.has_merged() || b.has_merged() {
            return;
        }
        let tier = a.tier;

        // Positions must still be readable; a stale body aborts the merge
        // before anything is claimed or destroyed.
        let (Some(pos_a), Some(pos_b)) = (world.position(contact.a), world.position(contact.b))
        else {
            return;
        };

        let Some(def) = factory.table().get(tier).cloned() else {
            return;
        };

        let Some(result_tier) = factory.table().next_tier(tier) else {
            // Terminal tier: the pair survives untouched.
            debug!("Maximum tier reached");
            state.push_event(GameEvent::max_tier_reached(state.tick, tier));
            return;
        };

        // Point of no return. Claim both entities first so further contact
        // events in this batch see the flag.
        let hook = self.hook_for(tier);
        for id in [id_a, id_b] {
            if let Some(e) = state.registry.get_mut(id) {
                e.claim_merged();
            }
            if let Some(e) = state.registry.get(id) {
                hook(e, &def);
            }
        }

        let points = def.point_value.saturating_mul(2);
        let new_score = state.add_score(points);

        let spawn_at = pos_a.midpoint(pos_b);
        state.registry.unregister(id_a);
        state.registry.unregister(id_b);
        world.destroy_body(contact.a);
        world.destroy_body(contact.b);

        match factory.create_at(world, result_tier, spawn_at) {
            Ok(product) => {
                world.set_mode(product.body, BodyMode::Dynamic);
                let result_id = product.id;
                state.registry.register(product);

                state.push_event(GameEvent::new(
                    state.tick,
                    GameEventData::Merged {
                        source_tier: tier,
                        result_tier,
                        result_id,
                        points,
                        new_score,
                        position: spawn_at,
                    },
                ));

                if state.note_tier_achieved(result_tier) {
                    let name = factory
                        .table()
                        .get(result_tier)
                        .map(|d| d.name.clone())
                        .unwrap_or_default();
                    state.push_event(GameEvent::new(
                        state.tick,
                        GameEventData::HighestTierAchieved {
                            tier: result_tier,
                            name,
                        },
                    ));
                }
            }
            Err(_) => {
                // Sources are gone and the points stand; the factory
                // already logged the configuration problem.
                state.push_event(GameEvent::new(
                    state.tick,
                    GameEventData::MergeSpawnFailed {
                        tier: result_tier,
                        points,
                    },
                ));
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::config::GameConfig;
    use crate::game::entity::EntityId;
    use crate::game::physics::{testing::TestWorld, BodyHandle};
    use crate::game::tier::{Rgb, TierTable};

    struct Fixture {
        state: GameState,
        factory: EntityFactory,
        world: TestWorld,
        resolver: MergeResolver,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_table(GameConfig::default().tier_table())
        }

        fn with_table(table: TierTable) -> Self {
            Self {
                state: GameState::new(1),
                factory: EntityFactory::new(table),
                world: TestWorld::new(),
                resolver: MergeResolver::new(),
            }
        }

        /// Create a dropped (dynamic, registered) entity.
        fn drop_entity(&mut self, tier: u8, position: Vec2) -> (EntityId, BodyHandle) {
            let e = self
                .factory
                .create_at(&mut self.world, tier, position)
                .unwrap();
            self.world.set_mode(e.body, BodyMode::Dynamic);
            let (id, body) = (e.id, e.body);
            self.state.registry.register(e);
            (id, body)
        }

        fn contact(&mut self, a: BodyHandle, b: BodyHandle) {
            self.resolver.resolve_contact(
                &mut self.state,
                &mut self.factory,
                &mut self.world,
                ContactEvent { a, b },
            );
        }
    }

    #[test]
    fn test_basic_merge() {
        let mut fx = Fixture::new();
        let (id_a, body_a) = fx.drop_entity(0, Vec2::new(-1.0, 1.0));
        let (id_b, body_b) = fx.drop_entity(0, Vec2::new(1.0, 3.0));

        fx.contact(body_a, body_b);

        // Sources gone, one tier-1 product at the midpoint, dynamic
        assert!(!fx.state.registry.contains(id_a));
        assert!(!fx.state.registry.contains(id_b));
        assert_eq!(fx.state.registry.count(), 1);

        let product = fx.state.registry.iter().next().unwrap();
        assert_eq!(product.tier, 1);
        assert_eq!(fx.world.mode(product.body), Some(BodyMode::Dynamic));
        assert_eq!(fx.world.position(product.body), Some(Vec2::new(0.0, 2.0)));

        // Two tier-0 entities at 1 point each
        assert_eq!(fx.state.score, 2);

        let events = fx.state.take_events();
        assert!(events.iter().any(|e| matches!(
            e.data,
            GameEventData::Merged {
                source_tier: 0,
                result_tier: 1,
                points: 2,
                new_score: 2,
                ..
            }
        )));
        assert!(events.iter().any(|e| matches!(
            &e.data,
            GameEventData::HighestTierAchieved { tier: 1, name } if name == "TierOne"
        )));
    }

    #[test]
    fn test_merge_chain_scoring() {
        let mut fx = Fixture::new();

        // Two tier-0 merges into a tier-1: 2 points
        let (_, a) = fx.drop_entity(0, Vec2::new(0.0, 0.0));
        let (_, b) = fx.drop_entity(0, Vec2::new(0.5, 0.0));
        fx.contact(a, b);
        assert_eq!(fx.state.score, 2);

        // Pair it with a fresh tier-1: 6 more points
        let product_body = fx.state.registry.iter().next().unwrap().body;
        let (_, c) = fx.drop_entity(1, Vec2::new(1.0, 0.0));
        fx.contact(product_body, c);

        assert_eq!(fx.state.score, 8);
        assert_eq!(fx.state.registry.count(), 1);
        assert_eq!(fx.state.registry.highest_tier(), Some(2));
        assert_eq!(fx.state.highest_achieved, Some(2));
    }

    #[test]
    fn test_terminal_tier_does_not_merge() {
        let mut fx = Fixture::new();
        let (id_a, a) = fx.drop_entity(2, Vec2::new(0.0, 0.0));
        let (id_b, b) = fx.drop_entity(2, Vec2::new(0.8, 0.0));

        fx.contact(a, b);

        // Both survive, unclaimed, no score
        assert!(fx.state.registry.contains(id_a));
        assert!(fx.state.registry.contains(id_b));
        assert!(!fx.state.registry.get(id_a).unwrap().has_merged());
        assert_eq!(fx.state.score, 0);

        let events = fx.state.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].data,
            GameEventData::MaxTierReached { tier: 2 }
        ));
    }

    #[test]
    fn test_claimed_entity_ignores_second_contact() {
        let mut fx = Fixture::new();
        let (_, a) = fx.drop_entity(0, Vec2::new(0.0, 0.0));
        let (_, b) = fx.drop_entity(0, Vec2::new(0.5, 0.0));
        let (id_c, c) = fx.drop_entity(0, Vec2::new(1.0, 0.0));

        // The engine reports both pairs in the same batch; a and b merge,
        // then the b/c contact arrives with b's body already stale.
        fx.contact(a, b);
        fx.contact(b, c);

        assert!(fx.state.registry.contains(id_c));
        assert_eq!(fx.state.registry.count_by_tier(0), 1);
        assert_eq!(fx.state.registry.count_by_tier(1), 1);
        assert_eq!(fx.state.score, 2);
    }

    #[test]
    fn test_merged_flag_blocks_contact() {
        let mut fx = Fixture::new();
        let (id_a, a) = fx.drop_entity(0, Vec2::ZERO);
        let (id_b, b) = fx.drop_entity(0, Vec2::new(0.5, 0.0));

        // Claim one entity while it is still registered; an equal-tier
        // contact against it must mutate nothing.
        fx.state.registry.get_mut(id_a).unwrap().claim_merged();
        fx.contact(a, b);

        assert!(fx.state.registry.contains(id_a));
        assert!(fx.state.registry.contains(id_b));
        assert!(!fx.state.registry.get(id_b).unwrap().has_merged());
        assert_eq!(fx.world.body_count(), 2);
        assert_eq!(fx.state.score, 0);
        assert!(fx.state.take_events().is_empty());
    }

    #[test]
    fn test_extreme_point_value_saturates_score() {
        let mut table = TierTable::with_slots(3);
        table.assign(TierDefinition {
            tier: 0,
            name: "A".into(),
            point_value: u32::MAX,
            size: 0.5,
            color: Rgb::new(1.0, 0.0, 0.0),
        });
        table.assign(TierDefinition {
            tier: 1,
            name: "B".into(),
            point_value: 1,
            size: 0.7,
            color: Rgb::new(0.0, 1.0, 0.0),
        });
        let mut fx = Fixture::with_table(table);

        let (_, a) = fx.drop_entity(0, Vec2::ZERO);
        let (_, b) = fx.drop_entity(0, Vec2::new(0.5, 0.0));
        fx.contact(a, b);

        // 2 * u32::MAX clamps instead of overflowing
        assert_eq!(fx.state.score, u32::MAX);
        assert_eq!(fx.state.registry.count_by_tier(1), 1);
    }

    #[test]
    fn test_different_tiers_no_merge() {
        let mut fx = Fixture::new();
        let (id_a, a) = fx.drop_entity(0, Vec2::ZERO);
        let (id_b, b) = fx.drop_entity(1, Vec2::new(0.5, 0.0));

        fx.contact(a, b);

        assert!(fx.state.registry.contains(id_a));
        assert!(fx.state.registry.contains(id_b));
        assert_eq!(fx.state.score, 0);
        assert!(fx.state.take_events().is_empty());
    }

    #[test]
    fn test_stale_handles_ignored() {
        let mut fx = Fixture::new();
        let (_, a) = fx.drop_entity(0, Vec2::ZERO);

        // Never-registered and already-destroyed handles both no-op
        fx.contact(a, BodyHandle(999));
        fx.contact(BodyHandle(998), BodyHandle(999));

        assert_eq!(fx.state.registry.count(), 1);
        assert_eq!(fx.state.score, 0);
        assert!(fx.state.take_events().is_empty());
    }

    #[test]
    fn test_self_contact_ignored() {
        let mut fx = Fixture::new();
        let (id_a, a) = fx.drop_entity(0, Vec2::ZERO);

        fx.contact(a, a);

        assert!(fx.state.registry.contains(id_a));
        assert_eq!(fx.state.score, 0);
    }

    #[test]
    fn test_gap_table_consumes_sources_and_scores() {
        // Tiers 0 and 2 configured, tier 1 missing: merging two tier-0
        // entities passes the point of no return and then fails to spawn.
        let mut table = TierTable::with_slots(3);
        table.assign(TierDefinition {
            tier: 0,
            name: "A".into(),
            point_value: 1,
            size: 0.5,
            color: Rgb::new(1.0, 0.0, 0.0),
        });
        table.assign(TierDefinition {
            tier: 2,
            name: "C".into(),
            point_value: 5,
            size: 0.9,
            color: Rgb::new(0.0, 0.0, 1.0),
        });
        let mut fx = Fixture::with_table(table);

        let (_, a) = fx.drop_entity(0, Vec2::ZERO);
        let (_, b) = fx.drop_entity(0, Vec2::new(0.5, 0.0));
        fx.contact(a, b);

        assert_eq!(fx.state.registry.count(), 0);
        assert_eq!(fx.world.body_count(), 0);
        assert_eq!(fx.state.score, 2);

        let events = fx.state.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].data,
            GameEventData::MergeSpawnFailed { tier: 1, points: 2 }
        ));
    }

    #[test]
    fn test_custom_hook_fires_per_source() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn counting_hook(_entity: &MergeEntity, _def: &TierDefinition) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let mut fx = Fixture::new();
        fx.resolver.set_hook(0, counting_hook);

        let (_, a) = fx.drop_entity(0, Vec2::ZERO);
        let (_, b) = fx.drop_entity(0, Vec2::new(0.5, 0.0));
        fx.contact(a, b);

        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any non-terminal merge awards twice the source's point value
            /// and produces exactly one entity of the next tier.
            #[test]
            fn merge_scoring_invariant(tier in 0u8..2) {
                let mut fx = Fixture::new();
                let def_points = fx.factory.table().get(tier).unwrap().point_value;

                let (_, a) = fx.drop_entity(tier, Vec2::ZERO);
                let (_, b) = fx.drop_entity(tier, Vec2::new(0.5, 0.5));
                fx.contact(a, b);

                prop_assert_eq!(fx.state.score, def_points * 2);
                prop_assert_eq!(fx.state.registry.count(), 1);
                prop_assert_eq!(
                    fx.state.registry.iter().next().unwrap().tier,
                    tier + 1
                );
            }
        }
    }
}
