//! SQLite-backed per-game lock (C2) — TTL stored as an absolute expiry
//! timestamp; acquisition is a single statement so a stale lock can be
//! stolen without a separate read-then-write race.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use storyforge_domain::GameStateId;
use storyforge_ports::{LockError, LockPort};

pub struct SqliteLock {
    pool: SqlitePool,
}

impl SqliteLock {
    pub async fn new(pool: SqlitePool) -> Result<Self, LockError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS game_locks (
                game_state_id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                expires_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| LockError::Backend(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl LockPort for SqliteLock {
    async fn try_acquire(&self, game_id: GameStateId, owner_id: &str, ttl: Duration) -> Result<bool, LockError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());

        sqlx::query("DELETE FROM game_locks WHERE game_state_id = ? AND expires_at <= ?")
            .bind(game_id.to_string())
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| LockError::Backend(e.to_string()))?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO game_locks (game_state_id, owner_id, expires_at) VALUES (?, ?, ?)",
        )
        .bind(game_id.to_string())
        .bind(owner_id)
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| LockError::Backend(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn release(&self, game_id: GameStateId, owner_id: &str) -> Result<(), LockError> {
        sqlx::query("DELETE FROM game_locks WHERE game_state_id = ? AND owner_id = ?")
            .bind(game_id.to_string())
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| LockError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        SqlitePool::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn second_acquire_fails_while_first_holds_it() {
        let lock = SqliteLock::new(test_pool().await).await.unwrap();
        let game_id = GameStateId::new();
        assert!(lock.try_acquire(game_id, "w1", Duration::from_secs(30)).await.unwrap());
        assert!(!lock.try_acquire(game_id, "w2", Duration::from_secs(30)).await.unwrap());
    }

    #[tokio::test]
    async fn release_is_a_no_op_for_a_non_owner() {
        let lock = SqliteLock::new(test_pool().await).await.unwrap();
        let game_id = GameStateId::new();
        lock.try_acquire(game_id, "w1", Duration::from_secs(30)).await.unwrap();
        lock.release(game_id, "w2").await.unwrap();
        assert!(!lock.try_acquire(game_id, "w3", Duration::from_secs(30)).await.unwrap());
    }
}
