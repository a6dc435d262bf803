//! Input Frames
//!
//! The input device is an external collaborator; the core consumes one
//! normalized frame per tick: a continuous horizontal aim value and a
//! discrete drop trigger. Clamping to the aim bounds happens inside the
//! spawn controller, not here.

use serde::{Deserialize, Serialize};

/// Normalized input state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Desired horizontal aim position (world units, unclamped)
    pub aim_x: f32,

    /// Drop trigger pressed this tick
    pub drop: bool,
}

impl InputFrame {
    /// Frame that only aims.
    pub fn aim(aim_x: f32) -> Self {
        Self { aim_x, drop: false }
    }

    /// Frame that aims and drops.
    pub fn drop_at(aim_x: f32) -> Self {
        Self { aim_x, drop: true }
    }
}
