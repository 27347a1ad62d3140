//! Worker loop (C4) — the dequeue → lock → dispatch → release cycle run by
//! every process instance pulling from the request queue (C1). Grounded on
//! the reference's queue-service worker loop: `tokio::select!` between a
//! cancellation token and a blocking dequeue, so shutdown never has to poll.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storyforge_domain::{GameStateId, Request};
use storyforge_ports::{LockPort, QueuePort};
use tokio_util::sync::CancellationToken;

/// What a dequeued, lock-held `Request` gets dispatched to. `storyforge-engine`'s
/// chat processor (C5) is the production implementation; tests supply fakes.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: Request);
}

pub struct Worker<Q: ?Sized, L: ?Sized, H: ?Sized> {
    queue: Arc<Q>,
    lock: Arc<L>,
    handler: Arc<H>,
    worker_id: String,
    dequeue_timeout: Duration,
    lock_ttl: Duration,
}

impl<Q, L, H> Worker<Q, L, H>
where
    Q: QueuePort + ?Sized + 'static,
    L: LockPort + ?Sized + 'static,
    H: RequestHandler + ?Sized + 'static,
{
    pub fn new(
        queue: Arc<Q>,
        lock: Arc<L>,
        handler: Arc<H>,
        worker_id: impl Into<String>,
        dequeue_timeout: Duration,
        lock_ttl: Duration,
    ) -> Self {
        Self {
            queue,
            lock,
            handler,
            worker_id: worker_id.into(),
            dequeue_timeout,
            lock_ttl,
        }
    }

    /// Runs until `cancel_token` fires. A request whose game is already
    /// locked by another worker is re-enqueued rather than dropped — the
    /// scheduler is cooperative, not starving (§4.2, §4.4).
    pub async fn run(self: Arc<Self>, cancel_token: CancellationToken) {
        loop {
            let dequeued = tokio::select! {
                biased;
                _ = cancel_token.cancelled() => {
                    tracing::info!(worker_id = %self.worker_id, "worker received shutdown signal");
                    break;
                }
                result = self.queue.blocking_dequeue(self.dequeue_timeout) => result,
            };

            let request = match dequeued {
                Ok(Some(request)) => request,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(worker_id = %self.worker_id, error = %err, "dequeue failed");
                    continue;
                }
            };

            self.dispatch(request).await;
        }
    }

    async fn dispatch(&self, request: Request) {
        let game_id: GameStateId = request.game_state_id;

        let acquired = match self.lock.try_acquire(game_id, &self.worker_id, self.lock_ttl).await {
            Ok(acquired) => acquired,
            Err(err) => {
                tracing::warn!(worker_id = %self.worker_id, %game_id, error = %err, "lock acquire failed");
                self.reenqueue(request).await;
                return;
            }
        };

        if !acquired {
            tracing::debug!(worker_id = %self.worker_id, %game_id, "lock held elsewhere, re-enqueueing");
            self.reenqueue(request).await;
            return;
        }

        self.handler.handle(request).await;

        if let Err(err) = self.lock.release(game_id, &self.worker_id).await {
            tracing::warn!(worker_id = %self.worker_id, %game_id, error = %err, "lock release failed");
        }
    }

    async fn reenqueue(&self, request: Request) {
        if let Err(err) = self.queue.enqueue(request).await {
            tracing::error!(worker_id = %self.worker_id, error = %err, "failed to re-enqueue contended request, dropping");
        }
    }
}
