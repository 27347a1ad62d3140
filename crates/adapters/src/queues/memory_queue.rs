//! In-process request queue (C1) — a single `Mutex<VecDeque>` plus a
//! `Notify` to wake blocked dequeuers. Adequate for a single-process
//! deployment or for tests; the reference transport (`sqlite_queue`) is the
//! durable alternative behind the same port.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use storyforge_domain::Request;
use storyforge_ports::{QueueError, QueuePort};
use tokio::sync::Notify;

pub struct InMemoryQueue {
    items: Mutex<VecDeque<Request>>,
    notify: Notify,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueuePort for InMemoryQueue {
    async fn enqueue(&self, request: Request) -> Result<(), QueueError> {
        self.items
            .lock()
            .map_err(|_| QueueError::Backend("queue lock poisoned".to_string()))?
            .push_back(request);
        self.notify.notify_one();
        Ok(())
    }

    async fn blocking_dequeue(&self, timeout: Duration) -> Result<Option<Request>, QueueError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            {
                let mut items = self
                    .items
                    .lock()
                    .map_err(|_| QueueError::Backend("queue lock poisoned".to_string()))?;
                if let Some(request) = items.pop_front() {
                    return Ok(Some(request));
                }
            }
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }
            let _ = tokio::time::timeout(remaining, self.notify.notified()).await;
        }
    }

    async fn depth(&self) -> Result<usize, QueueError> {
        Ok(self
            .items
            .lock()
            .map_err(|_| QueueError::Backend("queue lock poisoned".to_string()))?
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyforge_domain::GameStateId;

    #[tokio::test]
    async fn fifo_ordering_within_a_single_game() {
        let queue = InMemoryQueue::new();
        let game_id = GameStateId::new();
        queue.enqueue(Request::new_chat(game_id, "first")).await.unwrap();
        queue.enqueue(Request::new_chat(game_id, "second")).await.unwrap();

        let first = queue.blocking_dequeue(Duration::from_millis(10)).await.unwrap().unwrap();
        let second = queue.blocking_dequeue(Duration::from_millis(10)).await.unwrap().unwrap();

        assert!(matches!(first.kind, storyforge_domain::RequestKind::Chat { message, .. } if message == "first"));
        assert!(matches!(second.kind, storyforge_domain::RequestKind::Chat { message, .. } if message == "second"));
    }

    #[tokio::test]
    async fn dequeue_times_out_on_empty_queue() {
        let queue = InMemoryQueue::new();
        let result = queue.blocking_dequeue(Duration::from_millis(20)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn dequeue_wakes_as_soon_as_an_item_is_enqueued() {
        let queue = std::sync::Arc::new(InMemoryQueue::new());
        let game_id = GameStateId::new();
        let waiter = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.blocking_dequeue(Duration::from_secs(5)).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.enqueue(Request::new_chat(game_id, "hi")).await.unwrap();
        let result = waiter.await.unwrap().unwrap();
        assert!(result.is_some());
    }
}
