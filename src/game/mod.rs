//! Game simulation modules.

pub mod config;
pub mod entity;
pub mod events;
pub mod factory;
pub mod game_over;
pub mod input;
pub mod merge;
pub mod physics;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tier;

pub use config::GameConfig;
pub use entity::{EntityId, MergeEntity};
pub use events::{forward_events, GameEvent, GameEventData, ScoreSink, TracingScoreSink};
pub use factory::{EntityFactory, FactoryError};
pub use game_over::GameOverDetector;
pub use input::InputFrame;
pub use merge::{MergeHook, MergeResolver};
pub use physics::{BodyHandle, BodyMode, ContactEvent, PhysicsWorld};
pub use registry::Registry;
pub use spawn::SpawnController;
pub use state::{GamePhase, GameState};
pub use tick::{tick, TickResult};
pub use tier::{Rgb, TierDefinition, TierTable};
