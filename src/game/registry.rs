//! Entity Registry
//!
//! Authoritative set of live merge entities. Every dynamic body in the
//! physics world has exactly one entry here; the aimed kinematic entity is
//! held by the spawn controller instead. Uses BTreeMap for deterministic
//! iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::entity::{EntityId, MergeEntity};
use crate::game::physics::BodyHandle;
use crate::game::tier::TierTable;

/// Live set of merge entities, keyed by id with a reverse body index.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    entities: BTreeMap<EntityId, MergeEntity>,
    by_body: BTreeMap<BodyHandle, EntityId>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. No-op if the id is already present (dedup).
    pub fn register(&mut self, entity: MergeEntity) {
        if self.entities.contains_key(&entity.id) {
            return;
        }
        self.by_body.insert(entity.body, entity.id);
        self.entities.insert(entity.id, entity);
    }

    /// Remove and return an entity. Idempotent: removing an absent id
    /// returns `None` and changes nothing.
    pub fn unregister(&mut self, id: EntityId) -> Option<MergeEntity> {
        let entity = self.entities.remove(&id)?;
        self.by_body.remove(&entity.body);
        Some(entity)
    }

    /// Whether an entity is present.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities.
    pub fn count(&self) -> usize {
        self.entities.len()
    }

    /// Borrow an entity by id.
    pub fn get(&self, id: EntityId) -> Option<&MergeEntity> {
        self.entities.get(&id)
    }

    /// Mutably borrow an entity by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut MergeEntity> {
        self.entities.get_mut(&id)
    }

    /// Resolve a physics body handle to its entity id, if registered.
    pub fn id_by_body(&self, body: BodyHandle) -> Option<EntityId> {
        self.by_body.get(&body).copied()
    }

    /// Iterate live entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeEntity> {
        self.entities.values()
    }

    /// Snapshot of live ids, safe to walk while mutating the registry.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    // =========================================================================
    // Queries (pure reads over the current set)
    // =========================================================================

    /// Count of live entities of a given tier.
    pub fn count_by_tier(&self, tier: u8) -> usize {
        self.entities.values().filter(|e| e.tier == tier).count()
    }

    /// Sum of the point values of all live entities.
    pub fn total_points(&self, table: &TierTable) -> u64 {
        self.entities
            .values()
            .filter_map(|e| table.get(e.tier))
            .map(|def| def.point_value as u64)
            .sum()
    }

    /// Highest tier currently live, or `None` if the registry is empty.
    pub fn highest_tier(&self) -> Option<u8> {
        self.entities.values().map(|e| e.tier).max()
    }

    /// Display name of the highest live tier, if any.
    pub fn highest_tier_name<'a>(&self, table: &'a TierTable) -> Option<&'a str> {
        self.highest_tier()
            .and_then(|t| table.get(t))
            .map(|def| def.name.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
