//! Settings loader for reading `RunnerSettings` from environment variables,
//! keeping environment I/O out of `storyforge-engine`'s pure `EngineConfig`.
//!
//! The domain/engine layers have zero external I/O; this loader is the one
//! place in the workspace allowed to call `std::env::var`.

use std::time::Duration;

use storyforge_engine::EngineConfig;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBackend {
    Memory,
    Sqlite,
}

impl std::str::FromStr for QueueBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            _ => Ok(Self::Memory),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub engine: EngineConfig,
    pub queue_backend: QueueBackend,
    pub database_url: String,
}

/// Reads `STORYFORGE_*` environment variables with defaults for anything
/// missing or unparseable (§6's Configuration table).
pub fn load_settings_from_env() -> RunnerSettings {
    let defaults = EngineConfig::default();

    let engine = EngineConfig {
        worker_id: std::env::var("STORYFORGE_WORKER_ID").ok(),
        worker_timeout: Duration::from_millis(env_or(
            "STORYFORGE_WORKER_TIMEOUT_MS",
            defaults.worker_timeout.as_millis() as u64,
        )),
        lock_ttl: Duration::from_millis(env_or(
            "STORYFORGE_LOCK_TTL_MS",
            defaults.lock_ttl.as_millis() as u64,
        )),
        chat_deadline: Duration::from_millis(env_or(
            "STORYFORGE_CHAT_DEADLINE_MS",
            defaults.chat_deadline.as_millis() as u64,
        )),
        delta_deadline: Duration::from_millis(env_or(
            "STORYFORGE_DELTA_DEADLINE_MS",
            defaults.delta_deadline.as_millis() as u64,
        )),
        history_limit: env_or("STORYFORGE_HISTORY_LIMIT", defaults.history_limit),
        max_conditional_iterations: env_or(
            "STORYFORGE_MAX_CONDITIONAL_ITERATIONS",
            defaults.max_conditional_iterations,
        ),
        delta_max_attempts: env_or("STORYFORGE_DELTA_MAX_ATTEMPTS", defaults.delta_max_attempts),
    };

    RunnerSettings {
        engine,
        queue_backend: env_or("STORYFORGE_QUEUE_BACKEND", QueueBackend::Memory),
        database_url: std::env::var("STORYFORGE_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://storyforge.db".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_env_vars_match_engine_config_defaults() {
        let settings = load_settings_from_env();
        let defaults = EngineConfig::default();
        assert_eq!(settings.engine.worker_timeout, defaults.worker_timeout);
        assert_eq!(settings.engine.lock_ttl, defaults.lock_ttl);
        assert_eq!(settings.queue_backend, QueueBackend::Memory);
    }

    #[test]
    fn env_or_helper_falls_back_to_default_when_unset() {
        let result: usize = env_or("STORYFORGE_TEST_DEFINITELY_NOT_SET_12345", 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn unknown_queue_backend_string_falls_back_to_memory() {
        let backend: QueueBackend = "nonsense".parse().unwrap();
        assert_eq!(backend, QueueBackend::Memory);
    }
}
