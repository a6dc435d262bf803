//! # Suika Core
//!
//! Deterministic simulation core for a falling-object merge puzzle.
//! Players drop tiered objects into a container; when two objects of the
//! same tier touch, they merge into a single object of the next tier and
//! award points. The game ends when objects pile past the fill line.
//!
//! The crate owns game rules and state; physics, rendering, and input
//! devices are external collaborators behind narrow boundaries.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   tick driver                       │
//! │  spawn → physics step → merge resolve → game over   │
//! └──────┬───────────┬───────────┬──────────────┬───────┘
//!        │           │           │              │
//!   SpawnController  │      MergeResolver  GameOverDetector
//!        │           │           │              │
//!        └────► PhysicsWorld ◄───┘          Registry
//!              (trait boundary)        (live entities)
//! ```
//!
//! Determinism: all collection iteration uses BTreeMap ordering, tier
//! selection uses a seeded Xorshift128+ PRNG, and the tick driver takes
//! a fixed `dt`. Given the same seed, input script, and physics
//! implementation, two runs produce identical event streams.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

pub use crate::core::{DeterministicRng, Vec2};
pub use crate::game::{
    forward_events, tick, EntityFactory, GameConfig, GameEvent, GameEventData, GameState,
    InputFrame, MergeResolver, PhysicsWorld, Registry, ScoreSink, TickResult, TierDefinition,
    TierTable, TracingScoreSink,
};

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal simulation rate in ticks per second.
pub const TICK_RATE: u32 = 60;
