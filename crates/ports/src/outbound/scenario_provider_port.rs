//! Scenario provider port — scenario authoring and filesystem/asset loading
//! are explicitly out of the core's scope (§1); this is the named contract
//! the chat processor depends on to fetch one by id.

use async_trait::async_trait;
use storyforge_domain::{Scenario, ScenarioId};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioProviderError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ScenarioProviderPort: Send + Sync {
    async fn load(&self, id: ScenarioId) -> Result<Option<Scenario>, ScenarioProviderError>;
}
