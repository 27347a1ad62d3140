//! SQLite-backed request queue (C1) — the durable reference transport.
//! Dequeue uses the same atomic `UPDATE ... WHERE id = (SELECT ...) ...
//! RETURNING` idiom the reference queue uses to avoid a second worker
//! claiming a row between the select and the update.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use storyforge_domain::Request;
use storyforge_ports::{QueueError, QueuePort};

pub struct SqliteQueue {
    pool: SqlitePool,
}

impl SqliteQueue {
    pub async fn new(pool: SqlitePool) -> Result<Self, QueueError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS requests (
                request_id TEXT PRIMARY KEY,
                game_state_id TEXT NOT NULL,
                payload_json TEXT NOT NULL,
                claimed INTEGER NOT NULL DEFAULT 0,
                enqueued_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| QueueError::Backend(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl QueuePort for SqliteQueue {
    async fn enqueue(&self, request: Request) -> Result<(), QueueError> {
        let payload = serde_json::to_string(&request)?;
        sqlx::query(
            "INSERT INTO requests (request_id, game_state_id, payload_json, claimed, enqueued_at) \
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(request.request_id.to_string())
        .bind(request.game_state_id.to_string())
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| QueueError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn blocking_dequeue(&self, timeout: Duration) -> Result<Option<Request>, QueueError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let row: Option<(String,)> = sqlx::query_as(
                r#"
                UPDATE requests
                SET claimed = 1
                WHERE request_id = (
                    SELECT request_id FROM requests WHERE claimed = 0 ORDER BY enqueued_at ASC LIMIT 1
                )
                RETURNING payload_json
                "#,
            )
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueueError::Backend(e.to_string()))?;

            if let Some((payload,)) = row {
                let request: Request = serde_json::from_str(&payload)?;
                sqlx::query("DELETE FROM requests WHERE request_id = ?")
                    .bind(request.request_id.to_string())
                    .execute(&self.pool)
                    .await
                    .map_err(|e| QueueError::Backend(e.to_string()))?;
                return Ok(Some(request));
            }

            if tokio::time::Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    async fn depth(&self) -> Result<usize, QueueError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM requests WHERE claimed = 0")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| QueueError::Backend(e.to_string()))?;
        Ok(count as usize)
    }
}
