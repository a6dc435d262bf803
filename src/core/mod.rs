//! Core deterministic primitives.
//!
//! Shared value types for the simulation: 2D vectors for positions read
//! from the physics boundary, and a seeded PRNG so drop sequences replay
//! identically.

pub mod rng;
pub mod vec2;

// Re-export core types
pub use rng::DeterministicRng;
pub use vec2::Vec2;
