//! Tier Definitions
//!
//! Static data for the merge progression. One `TierDefinition` per tier
//! index, held in a `TierTable` whose slots may be left unconfigured
//! (the original content pipeline shipped more slots than finished tiers).
//! Adding a tier is a data entry, not a new type.

use serde::{Deserialize, Serialize};

/// RGB color tint applied by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel, 0.0..=1.0
    pub r: f32,
    /// Green channel, 0.0..=1.0
    pub g: f32,
    /// Blue channel, 0.0..=1.0
    pub b: f32,
}

impl Rgb {
    /// Create a color from channel values.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Immutable attributes for one tier in the merge chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Position in the merge chain (0 = first, highest = last)
    pub tier: u8,

    /// Display name for UI and log messages
    pub name: String,

    /// Score points awarded when an entity of this tier is part of a merge
    pub point_value: u32,

    /// Visual scale multiplier; the physics body radius is half of this
    pub size: f32,

    /// Sprite color tint
    pub color: Rgb,
}

impl TierDefinition {
    /// Physics body radius derived from the visual size (unit circle sprite).
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }
}

/// Read-only table mapping tier index to its definition.
///
/// Slots model the original's fixed prefab array: an index inside the
/// slot range may still have no definition assigned.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TierTable {
    slots: Vec<Option<TierDefinition>>,
}

impl TierTable {
    /// Create an empty table with the given number of slots.
    pub fn with_slots(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Number of slots (valid tier indices are `0..slot_count`).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Assign a definition to its slot. Definitions with an index outside
    /// the slot range are dropped by the config validator before this runs.
    pub fn assign(&mut self, def: TierDefinition) {
        let idx = def.tier as usize;
        if idx < self.slots.len() {
            self.slots[idx] = Some(def);
        }
    }

    /// Look up the definition for a tier, if configured.
    pub fn get(&self, tier: u8) -> Option<&TierDefinition> {
        self.slots.get(tier as usize).and_then(|s| s.as_ref())
    }

    /// Whether a tier index is inside the slot range.
    #[inline]
    pub fn in_range(&self, tier: u8) -> bool {
        (tier as usize) < self.slots.len()
    }

    /// Whether a tier has a definition assigned.
    #[inline]
    pub fn is_configured(&self, tier: u8) -> bool {
        self.get(tier).is_some()
    }

    /// Highest tier index with a definition, or `None` if the table is empty.
    pub fn max_configured_tier(&self) -> Option<u8> {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.is_some())
            .map(|(i, _)| i as u8)
    }

    /// Merge result tier: `tier + 1` for every tier below the maximum
    /// configured tier, `None` (terminal) at or above it.
    ///
    /// A configured gap (say slots 0 and 2 with slot 1 empty) still yields
    /// `Some(1)` for tier 0; the factory then reports the missing
    /// definition, matching the original's "no prefab for next tier" path.
    pub fn next_tier(&self, tier: u8) -> Option<u8> {
        match self.max_configured_tier() {
            Some(max) if tier < max => Some(tier + 1),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
