//! Merge Entities
//!
//! Per-object runtime state. Attribute data (name, points, size) lives in
//! the tier table; the entity carries only its identity, its tier, the
//! one-shot merge claim, and the physics body handle. Position belongs to
//! the physics world and is read through the handle.

use serde::{Deserialize, Serialize};

use crate::game::physics::BodyHandle;

/// Unique entity identifier (monotonic counter).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// A live object in the merge chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MergeEntity {
    /// Unique entity id
    pub id: EntityId,

    /// Tier index, fixed at creation
    pub tier: u8,

    /// Physics body this entity is attached to
    pub body: BodyHandle,

    /// One-shot merge claim; never reset once set
    merged: bool,
}

impl MergeEntity {
    /// Create a new, unclaimed entity.
    pub fn new(id: EntityId, tier: u8, body: BodyHandle) -> Self {
        Self {
            id,
            tier,
            body,
            merged: false,
        }
    }

    /// Has this entity already been claimed by a merge this pass?
    #[inline]
    pub fn has_merged(&self) -> bool {
        self.merged
    }

    /// Claim this entity for a merge. Must happen before any destructive
    /// side effect so a second contact event in the same pass sees the flag.
    pub fn claim_merged(&mut self) {
        self.merged = true;
    }
}

// =============================================================================
// TESTS
// =============================================================================
