//! Conditional rules evaluated by the cascade (C7).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::delta::GameStateDelta;
use crate::game_state::GameState;

/// Conjunction of predicates a `Conditional` fires on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionalWhen {
    /// Every `vars[k] == v` must hold.
    #[serde(default)]
    pub vars: HashMap<String, String>,
    /// Current turn count must be `>= min_turns`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_turns: Option<i64>,
    /// Current scene must equal this, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    /// All listed items must be present in inventory, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<String>>,
}

impl ConditionalWhen {
    pub fn holds(&self, state: &GameState) -> bool {
        let vars_match = self
            .vars
            .iter()
            .all(|(k, v)| state.vars.get(k).map(|sv| sv == v).unwrap_or(false));

        let turns_match = self
            .min_turns
            .map(|min| state.total_turns() >= min)
            .unwrap_or(true);

        let scene_match = self
            .scene
            .as_ref()
            .map(|scene| scene == &state.scene_name)
            .unwrap_or(true);

        let inventory_match = self
            .inventory
            .as_ref()
            .map(|items| items.iter().all(|item| state.inventory.contains(item)))
            .unwrap_or(true);

        vars_match && turns_match && scene_match && inventory_match
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditional {
    pub id: String,
    pub when: ConditionalWhen,
    pub then: GameStateDelta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{GameStateId, ScenarioId};

    fn state_with(vars: &[(&str, &str)], turns: i64, scene: &str, inventory: &[&str]) -> GameState {
        let mut state = GameState::new(GameStateId::new(), ScenarioId::new(), scene);
        for (k, v) in vars {
            state.vars.insert(k.to_string(), v.to_string());
        }
        state.turn_counters.insert("total".to_string(), turns);
        state.inventory = inventory.iter().map(|s| s.to_string()).collect();
        state
    }

    #[test]
    fn holds_when_all_predicates_satisfied() {
        let when = ConditionalWhen {
            vars: [("player_score".to_string(), "100".to_string())].into(),
            min_turns: Some(2),
            scene: Some("throne_room".to_string()),
            inventory: Some(vec!["crown".to_string()]),
        };
        let state = state_with(&[("player_score", "100")], 5, "throne_room", &["crown", "sword"]);
        assert!(when.holds(&state));
    }

    #[test]
    fn fails_when_any_single_predicate_unsatisfied() {
        let when = ConditionalWhen {
            vars: [("player_score".to_string(), "100".to_string())].into(),
            min_turns: None,
            scene: None,
            inventory: None,
        };
        let state = state_with(&[("player_score", "50")], 0, "intro", &[]);
        assert!(!when.holds(&state));
    }

    #[test]
    fn min_turns_is_inclusive_boundary() {
        let when = ConditionalWhen {
            min_turns: Some(3),
            ..Default::default()
        };
        let below = state_with(&[], 2, "intro", &[]);
        let at = state_with(&[], 3, "intro", &[]);
        assert!(!when.holds(&below));
        assert!(when.holds(&at));
    }

    #[test]
    fn empty_when_always_holds() {
        let when = ConditionalWhen::default();
        let state = state_with(&[], 0, "intro", &[]);
        assert!(when.holds(&state));
    }
}
