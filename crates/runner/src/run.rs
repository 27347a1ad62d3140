//! Composition root: wires concrete adapters to the engine's worker loop
//! and runs it until a shutdown signal arrives. Kept thin on purpose — all
//! the pipeline logic lives in `storyforge-engine`.

use std::sync::Arc;
use std::time::Duration;

use storyforge_adapters::{
    broadcast::TokioBroadcast,
    lock::{InMemoryLock, SqliteLock},
    llm::NullLlm,
    queues::{InMemoryQueue, SqliteQueue},
    scenarios::InMemoryScenarioProvider,
    store::{InMemoryGameStateStore, SqliteGameStateStore},
    story_events::InMemoryStoryEventQueue,
};
use storyforge_engine::{ChatProcessor, Worker};
use storyforge_ports::{BroadcastPort, GameStateStorePort, LlmPort, QueuePort, ScenarioProviderPort, StoryEventQueuePort};
use tokio_util::sync::CancellationToken;

use crate::settings_loader::{load_settings_from_env, QueueBackend};

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

pub async fn run() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = load_settings_from_env();
    let worker_id = settings
        .engine
        .worker_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let (queue, lock, store): (Arc<dyn QueuePort>, Arc<dyn storyforge_ports::LockPort>, Arc<dyn GameStateStorePort>) =
        match settings.queue_backend {
            QueueBackend::Memory => (
                Arc::new(InMemoryQueue::new()),
                Arc::new(InMemoryLock::new()),
                Arc::new(InMemoryGameStateStore::new()),
            ),
            QueueBackend::Sqlite => {
                let pool = sqlx::SqlitePool::connect(&settings.database_url).await?;
                (
                    Arc::new(SqliteQueue::new(pool.clone()).await?),
                    Arc::new(SqliteLock::new(pool.clone()).await?),
                    Arc::new(SqliteGameStateStore::new(pool).await?),
                )
            }
        };

    let story_events: Arc<dyn StoryEventQueuePort> = Arc::new(InMemoryStoryEventQueue::new());
    let scenarios: Arc<dyn ScenarioProviderPort> = Arc::new(InMemoryScenarioProvider::new(Default::default()));
    let llm: Arc<dyn LlmPort> = Arc::new(NullLlm::default());
    let broadcast: Arc<dyn BroadcastPort> = Arc::new(TokioBroadcast::new(256));

    let processor = Arc::new(ChatProcessor::new(
        store,
        scenarios,
        story_events,
        llm,
        broadcast,
        settings.engine.clone(),
    ));

    let worker = Arc::new(Worker::new(
        queue,
        lock,
        processor,
        worker_id.clone(),
        settings.engine.worker_timeout,
        settings.engine.lock_ttl,
    ));

    let cancel_token = CancellationToken::new();
    let run_handle = tokio::spawn(worker.run(cancel_token.clone()));

    tracing::info!(worker_id = %worker_id, "storyforge worker started");
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, cancelling worker loop");
    cancel_token.cancel();

    if tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, run_handle).await.is_err() {
        tracing::warn!("worker did not shut down within the grace period");
    }

    Ok(())
}
