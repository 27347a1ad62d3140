//! Per-game mutual-exclusion lock port (C2).

use std::time::Duration;

use async_trait::async_trait;
use storyforge_domain::GameStateId;

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("backend error: {0}")]
    Backend(String),
}

/// At most one worker holds the lock for a given `game_state_id` at any
/// instant. A held lock blocks no operation directly — it only informs the
/// worker's dispatch decision (§4.2, §5).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LockPort: Send + Sync {
    /// Atomic set-if-absent. `true` iff acquired.
    async fn try_acquire(
        &self,
        game_id: GameStateId,
        owner_id: &str,
        ttl: Duration,
    ) -> Result<bool, LockError>;

    /// Compare-and-delete: removes the lock iff the stored owner equals
    /// `owner_id`. Never deletes another owner's lock (§4.2, lock-release
    /// safety property in §8).
    async fn release(&self, game_id: GameStateId, owner_id: &str) -> Result<(), LockError>;
}
