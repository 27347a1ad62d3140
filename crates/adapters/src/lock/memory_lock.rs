//! In-process per-game lock (C2) — a `DashMap<GameStateId, (owner, expires_at)>`.
//! TTL is checked lazily on `try_acquire`: an expired entry is treated as
//! absent rather than swept by a background task.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use storyforge_domain::GameStateId;
use storyforge_ports::{LockError, LockPort};
use tokio::time::Instant;

struct LockEntry {
    owner: String,
    expires_at: Instant,
}

pub struct InMemoryLock {
    locks: DashMap<GameStateId, LockEntry>,
}

impl InMemoryLock {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockPort for InMemoryLock {
    async fn try_acquire(&self, game_id: GameStateId, owner_id: &str, ttl: Duration) -> Result<bool, LockError> {
        let now = Instant::now();
        let mut acquired = false;
        self.locks
            .entry(game_id)
            .and_modify(|entry| {
                if entry.expires_at <= now {
                    entry.owner = owner_id.to_string();
                    entry.expires_at = now + ttl;
                    acquired = true;
                }
            })
            .or_insert_with(|| {
                acquired = true;
                LockEntry {
                    owner: owner_id.to_string(),
                    expires_at: now + ttl,
                }
            });
        Ok(acquired)
    }

    async fn release(&self, game_id: GameStateId, owner_id: &str) -> Result<(), LockError> {
        self.locks.remove_if(&game_id, |_, entry| entry.owner == owner_id);
        Ok(())
    }
}
