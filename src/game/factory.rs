//! Entity Factory
//!
//! Creates merge entities from the tier table and wires them to a fresh
//! physics body. Misconfiguration (bad index, empty slot) is a warning,
//! not a crash: the surrounding game loop keeps running either way.

use thiserror::Error;
use tracing::warn;

use crate::core::vec2::Vec2;
use crate::game::entity::{EntityId, MergeEntity};
use crate::game::physics::{BodyMode, PhysicsWorld};
use crate::game::tier::{TierDefinition, TierTable};

/// Why an entity could not be created.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FactoryError {
    /// Tier index outside the configured slot range.
    #[error("invalid tier {tier}: valid range is 0..{slots}")]
    InvalidTier {
        /// Requested tier
        tier: u8,
        /// Number of configured slots
        slots: usize,
    },

    /// Tier index in range but no definition assigned to the slot.
    #[error("no definition assigned for tier {0}")]
    UnconfiguredTier(u8),
}

/// Creates entities of a requested tier, attached to fresh physics bodies.
#[derive(Debug)]
pub struct EntityFactory {
    table: TierTable,
    next_id: u64,
}

impl EntityFactory {
    /// Build a factory over a loaded tier table.
    pub fn new(table: TierTable) -> Self {
        Self { table, next_id: 0 }
    }

    /// The tier table this factory reads from.
    pub fn table(&self) -> &TierTable {
        &self.table
    }

    /// Highest tier index with a definition, or `None` if the table is empty.
    pub fn max_configured_tier(&self) -> Option<u8> {
        self.table.max_configured_tier()
    }

    /// Look up the definition backing a tier, validating the request.
    fn definition(&self, tier: u8) -> Result<&TierDefinition, FactoryError> {
        if !self.table.in_range(tier) {
            return Err(FactoryError::InvalidTier {
                tier,
                slots: self.table.slot_count(),
            });
        }
        self.table
            .get(tier)
            .ok_or(FactoryError::UnconfiguredTier(tier))
    }

    /// Create an entity of `tier` with a fresh kinematic body at the origin.
    ///
    /// Failures are logged as configuration warnings and abort the
    /// operation; no body is created.
    pub fn create(
        &mut self,
        world: &mut dyn PhysicsWorld,
        tier: u8,
    ) -> Result<MergeEntity, FactoryError> {
        self.create_at(world, tier, Vec2::ZERO)
    }

    /// Create an entity of `tier` placed at `position`.
    pub fn create_at(
        &mut self,
        world: &mut dyn PhysicsWorld,
        tier: u8,
        position: Vec2,
    ) -> Result<MergeEntity, FactoryError> {
        let def = match self.definition(tier) {
            Ok(def) => def,
            Err(err) => {
                warn!("entity factory: {err}");
                return Err(err);
            }
        };

        let body = world.create_body(def.radius(), position, BodyMode::Kinematic);
        let id = EntityId(self.next_id);
        self.next_id += 1;

        Ok(MergeEntity::new(id, tier, body))
    }
}

// =============================================================================
// TESTS
// =============================================================================
