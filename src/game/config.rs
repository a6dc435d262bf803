//! Game Configuration
//!
//! Loaded once at startup, immutable afterwards. Defaults carry the
//! original game's tuning values.

use anyhow::{bail, Context, Result};

use serde::{Deserialize, Serialize};

use crate::game::tier::{Rgb, TierDefinition, TierTable};

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of tier slots (valid tier indices are `0..tier_slots`).
    /// Slots without a matching definition stay unconfigured.
    pub tier_slots: usize,

    /// Tier definitions, placed into slots by their `tier` index.
    pub tiers: Vec<TierDefinition>,

    /// Highest tier that can be randomly spawned for dropping
    pub max_drop_tier: u8,

    /// Seconds to wait between drops
    pub drop_cooldown: f32,

    /// Y position of the drop/aim line
    pub drop_line_y: f32,

    /// Left boundary for aiming (inside container)
    pub aim_min_x: f32,

    /// Right boundary for aiming (inside container)
    pub aim_max_x: f32,

    /// Y position above which dynamic entities trigger game over
    pub game_over_line_y: f32,

    /// Seconds an entity must stay above the line before game over fires
    pub game_over_delay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tier_slots: 5,
            tiers: default_tiers(),
            max_drop_tier: 2,
            drop_cooldown: 0.5,
            drop_line_y: 4.0,
            aim_min_x: -2.5,
            aim_max_x: 2.5,
            game_over_line_y: 4.5,
            game_over_delay: 2.0,
        }
    }
}

/// The original three-tier chain: 1, 3, and 6 points.
fn default_tiers() -> Vec<TierDefinition> {
    vec![
        TierDefinition {
            tier: 0,
            name: "TierZero".to_string(),
            point_value: 1,
            size: 0.5,
            color: Rgb::new(0.85, 0.12, 0.15),
        },
        TierDefinition {
            tier: 1,
            name: "TierOne".to_string(),
            point_value: 3,
            size: 0.65,
            color: Rgb::new(0.20, 0.45, 0.85),
        },
        TierDefinition {
            tier: 2,
            name: "TierTwo".to_string(),
            point_value: 6,
            size: 0.8,
            color: Rgb::new(0.20, 0.75, 0.30),
        },
    ]
}

impl GameConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).context("failed to parse game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        for def in &self.tiers {
            if (def.tier as usize) >= self.tier_slots {
                bail!(
                    "tier {} ({:?}) is outside the slot range 0..{}",
                    def.tier,
                    def.name,
                    self.tier_slots
                );
            }
            if def.name.is_empty() {
                bail!("tier {} has an empty name", def.tier);
            }
        }
        for (i, a) in self.tiers.iter().enumerate() {
            if self.tiers[..i].iter().any(|b| b.tier == a.tier) {
                bail!("duplicate definition for tier {}", a.tier);
            }
        }
        if self.aim_min_x > self.aim_max_x {
            bail!(
                "aim bounds are inverted: {} > {}",
                self.aim_min_x,
                self.aim_max_x
            );
        }
        if self.drop_cooldown < 0.0 || self.game_over_delay < 0.0 {
            bail!("cooldown and game-over delay must be non-negative");
        }
        Ok(())
    }

    /// Build the immutable tier table this configuration describes.
    pub fn tier_table(&self) -> TierTable {
        let mut table = TierTable::with_slots(self.tier_slots);
        for def in &self.tiers {
            table.assign(def.clone());
        }
        table
    }
}

// =============================================================================
// TESTS
// =============================================================================
