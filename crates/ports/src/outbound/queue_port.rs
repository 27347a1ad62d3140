//! Request queue port (C1) — FIFO transport with blocking dequeue.

use std::time::Duration;

use async_trait::async_trait;
use storyforge_domain::Request;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Storage-agnostic FIFO transport for `Request`s.
///
/// Ordering: global FIFO. Safe for many concurrent producers/consumers.
/// Implementations carry no durability guarantee beyond their own backend.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait QueuePort: Send + Sync {
    /// Push to the tail. Errors surface to the caller; retry is the
    /// caller's decision (§4.1).
    async fn enqueue(&self, request: Request) -> Result<(), QueueError>;

    /// Pop from the head, blocking up to `timeout`. `None` on timeout.
    async fn blocking_dequeue(&self, timeout: Duration) -> Result<Option<Request>, QueueError>;

    /// Pending item count, for observability.
    async fn depth(&self) -> Result<usize, QueueError>;
}
