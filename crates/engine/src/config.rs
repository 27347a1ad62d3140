//! Engine configuration (§6) — every value here has a spec-mandated default
//! and is expected to be loaded from the environment by the runner crate's
//! loader, not constructed ad hoc by callers.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Optional stable worker identifier; random if absent.
    pub worker_id: Option<String>,
    pub worker_timeout: Duration,
    pub lock_ttl: Duration,
    pub chat_deadline: Duration,
    pub delta_deadline: Duration,
    pub history_limit: usize,
    pub max_conditional_iterations: usize,
    pub delta_max_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_id: None,
            worker_timeout: Duration::from_millis(5_000),
            lock_ttl: Duration::from_millis(30_000),
            chat_deadline: Duration::from_millis(30_000),
            delta_deadline: Duration::from_millis(30_000),
            history_limit: 6,
            max_conditional_iterations: 10,
            delta_max_attempts: 2,
        }
    }
}
