//! Core data model for the StoryForge turn-processing pipeline: requests,
//! per-game state, scenario configuration, conditionals, and deltas.
//!
//! This crate has no I/O and no async — it is pure data plus the few
//! predicate/composition functions (`ConditionalWhen::holds`,
//! `GameStateDelta::merge`) that need to be testable without a runtime.

pub mod conditional;
pub mod delta;
pub mod error;
pub mod game_state;
pub mod ids;
pub mod request;
pub mod scenario;

pub use conditional::{Conditional, ConditionalWhen};
pub use delta::{GameStateDelta, SceneChange};
pub use error::DomainError;
pub use game_state::{ChatEntry, ChatRole, GameState};
pub use ids::{GameStateId, RequestId, ScenarioId};
pub use request::{Request, RequestKind};
pub use scenario::{Scenario, Scene};
