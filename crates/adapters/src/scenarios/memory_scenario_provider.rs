//! In-process scenario provider — a fixed `HashMap<ScenarioId, Scenario>`
//! supplied at construction. Real scenario authoring/filesystem loading is
//! an external collaborator's job (§1); this just satisfies the port for
//! tests and single-process deployments that preload their scenarios.

use std::collections::HashMap;

use async_trait::async_trait;
use storyforge_domain::{Scenario, ScenarioId};
use storyforge_ports::{ScenarioProviderError, ScenarioProviderPort};

pub struct InMemoryScenarioProvider {
    scenarios: HashMap<ScenarioId, Scenario>,
}

impl InMemoryScenarioProvider {
    pub fn new(scenarios: HashMap<ScenarioId, Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn single(id: ScenarioId, scenario: Scenario) -> Self {
        Self::new(HashMap::from([(id, scenario)]))
    }
}

#[async_trait]
impl ScenarioProviderPort for InMemoryScenarioProvider {
    async fn load(&self, id: ScenarioId) -> Result<Option<Scenario>, ScenarioProviderError> {
        Ok(self.scenarios.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_preloaded_scenario() {
        let id = ScenarioId::new();
        let scenario = Scenario {
            name: "test".to_string(),
            opening_prompt: "begin".to_string(),
            contingency_rules: Vec::new(),
            scenes: HashMap::new(),
            default_pc: None,
        };
        let provider = InMemoryScenarioProvider::single(id, scenario);
        assert!(provider.load(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_id_is_none_not_error() {
        let provider = InMemoryScenarioProvider::new(HashMap::new());
        assert!(provider.load(ScenarioId::new()).await.unwrap().is_none());
    }
}
