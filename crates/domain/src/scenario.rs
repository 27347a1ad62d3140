//! Immutable static configuration loaded at request time.
//!
//! Scenario authoring (reading these off disk, assembling `default_pc`
//! assets) is an external collaborator's job per the core's non-goals; this
//! module only defines the shape the engine reasons over.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::conditional::Conditional;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub contingency_rules: Vec<String>,
    #[serde(default)]
    pub conditionals: HashMap<String, Conditional>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            contingency_rules: Vec::new(),
            conditionals: HashMap::new(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub opening_prompt: String,
    #[serde(default)]
    pub contingency_rules: Vec<String>,
    pub scenes: HashMap<String, Scene>,
    /// Opaque per the core's non-goals: PC asset loading lives outside the
    /// pipeline this crate implements.
    #[serde(default)]
    pub default_pc: Option<serde_json::Value>,
}

impl Scenario {
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Conditionals active in a named scene, in stable id order — the order
    /// the cascade (C7) fires them in within an iteration.
    pub fn conditionals_for_scene(&self, scene_name: &str) -> Vec<&Conditional> {
        let mut out: Vec<&Conditional> = self
            .scene(scene_name)
            .map(|scene| scene.conditionals.values().collect())
            .unwrap_or_default();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Global + scenario-scoped + current-scene contingency rules,
    /// concatenated for the Phase B reducer system message (§4.5.B.2).
    pub fn contingency_rules_for(&self, scene_name: &str) -> Vec<&str> {
        let mut rules: Vec<&str> = self.contingency_rules.iter().map(String::as_str).collect();
        if let Some(scene) = self.scene(scene_name) {
            rules.extend(scene.contingency_rules.iter().map(String::as_str));
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional::{Conditional, ConditionalWhen};
    use crate::delta::GameStateDelta;

    fn scenario_with_conditionals(ids: &[&str]) -> Scenario {
        let mut scene = Scene::new();
        for id in ids {
            scene.conditionals.insert(
                id.to_string(),
                Conditional {
                    id: id.to_string(),
                    when: ConditionalWhen::default(),
                    then: GameStateDelta::default(),
                },
            );
        }
        let mut scenes = HashMap::new();
        scenes.insert("intro".to_string(), scene);
        Scenario {
            name: "test".to_string(),
            opening_prompt: "begin".to_string(),
            contingency_rules: vec!["global rule".to_string()],
            scenes,
            default_pc: None,
        }
    }

    #[test]
    fn conditionals_for_scene_are_sorted_by_id() {
        let scenario = scenario_with_conditionals(&["charlie", "alpha", "bravo"]);
        let ids: Vec<&str> = scenario
            .conditionals_for_scene("intro")
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn contingency_rules_concatenate_global_and_scene() {
        let mut scenario = scenario_with_conditionals(&[]);
        scenario.scenes.get_mut("intro").unwrap().contingency_rules =
            vec!["scene rule".to_string()];
        let rules = scenario.contingency_rules_for("intro");
        assert_eq!(rules, vec!["global rule", "scene rule"]);
    }

    #[test]
    fn unknown_scene_yields_no_conditionals() {
        let scenario = scenario_with_conditionals(&["a"]);
        assert!(scenario.conditionals_for_scene("nowhere").is_empty());
    }
}
