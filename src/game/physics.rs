//! Physics Boundary
//!
//! The rigid-body engine is an external collaborator. The simulation core
//! only needs body creation/destruction, per-body mode switching, position
//! read/write, and the contact events one integration step produced. This
//! trait is that contract; the engine behind it is a black box.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Opaque handle to a body owned by the physics world.
///
/// Implements Ord so it can key a BTreeMap for deterministic lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

/// Simulation mode of a physics body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyMode {
    /// Positioned directly, ignores forces and gravity (aimed entity)
    Kinematic,
    /// Fully simulated: gravity, collision response
    Dynamic,
    /// Present but not simulated at all
    Disabled,
}

/// A pairwise contact reported by one integration step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    /// First body of the pair
    pub a: BodyHandle,
    /// Second body of the pair
    pub b: BodyHandle,
}

/// Contract toward the external physics engine.
///
/// Contact events may be delivered for bodies that were destroyed earlier
/// in the same tick; consumers must tolerate stale handles. Switching a
/// body to [`BodyMode::Kinematic`] must also zero its velocities.
pub trait PhysicsWorld {
    /// Create a circular body and return its handle.
    fn create_body(&mut self, radius: f32, position: Vec2, mode: BodyMode) -> BodyHandle;

    /// Destroy a body. Destroying an unknown handle is a no-op.
    fn destroy_body(&mut self, body: BodyHandle);

    /// Switch a body's simulation mode.
    fn set_mode(&mut self, body: BodyHandle, mode: BodyMode);

    /// Current mode of a body, or `None` for a stale handle.
    fn mode(&self, body: BodyHandle) -> Option<BodyMode>;

    /// Current position of a body, or `None` for a stale handle.
    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    /// Teleport a body (used while aiming and when placing merge products).
    fn set_position(&mut self, body: BodyHandle, position: Vec2);

    /// Advance the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Take the contact events produced since the last call.
    fn drain_contacts(&mut self) -> Vec<ContactEvent>;
}

// =============================================================================
// TEST DOUBLE
// =============================================================================
