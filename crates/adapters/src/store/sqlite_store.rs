//! SQLite-backed game-state store (C8) — one row per game under
//! `gamestate:<uuid>`'s relational equivalent; `updated_at` drives an
//! explicit cleanup pass rather than native TTL, since SQLite has none.

use chrono::{Duration as ChronoDuration, Utc};
use sqlx::SqlitePool;
use storyforge_domain::{GameState, GameStateId};
use storyforge_ports::{GameStateStorePort, StoreError};

pub struct SqliteGameStateStore {
    pool: SqlitePool,
}

impl SqliteGameStateStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS game_states (
                game_state_id TEXT PRIMARY KEY,
                payload_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Deletes rows whose `updated_at` is older than `idle_for` — the
    /// relational stand-in for the reference store's native TTL (§4.8).
    pub async fn sweep_expired(&self, idle_for: std::time::Duration) -> Result<u64, StoreError> {
        let cutoff = Utc::now() - ChronoDuration::from_std(idle_for).unwrap_or(ChronoDuration::zero());
        let result = sqlx::query("DELETE FROM game_states WHERE updated_at < ?")
            .bind(cutoff.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl GameStateStorePort for SqliteGameStateStore {
    async fn save(&self, state: &GameState) -> Result<(), StoreError> {
        let mut state = state.clone();
        state.updated_at = Utc::now();
        let payload = serde_json::to_string(&state)?;
        sqlx::query(
            "INSERT INTO game_states (game_state_id, payload_json, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(game_state_id) DO UPDATE SET payload_json = excluded.payload_json, updated_at = excluded.updated_at",
        )
        .bind(state.id.to_string())
        .bind(payload)
        .bind(state.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn load(&self, id: GameStateId) -> Result<Option<GameState>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT payload_json FROM game_states WHERE game_state_id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(match row {
            Some((payload,)) => Some(serde_json::from_str(&payload)?),
            None => None,
        })
    }

    async fn delete(&self, id: GameStateId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM game_states WHERE game_state_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
