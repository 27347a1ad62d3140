//! Game-state store port (C8) — TTL'd key-value persistence.

use async_trait::async_trait;
use storyforge_domain::{GameState, GameStateId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

/// No optimistic concurrency is enforced here; correctness depends on
/// callers holding the per-game lock (C2). `load` distinguishes "not
/// found" (`Ok(None)`) from a transport error (`Err`).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait GameStateStorePort: Send + Sync {
    /// Unconditional overwrite; implementations stamp `updated_at`.
    async fn save(&self, state: &GameState) -> Result<(), StoreError>;

    async fn load(&self, id: GameStateId) -> Result<Option<GameState>, StoreError>;

    /// Idempotent.
    async fn delete(&self, id: GameStateId) -> Result<(), StoreError>;
}
