//! `GameStateDelta`: the structured patch emitted by the LLM reducer or a
//! fired conditional. Applying a delta to a `GameState` is the Delta
//! worker's (C6) job, implemented in `storyforge-engine`; this module only
//! owns the shape and the composition rule from §3.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneChange {
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateDelta {
    #[serde(default)]
    pub set_vars: HashMap<String, String>,
    #[serde(default)]
    pub unset_vars: Vec<String>,
    #[serde(default)]
    pub add_inventory: Vec<String>,
    #[serde(default)]
    pub remove_inventory: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_change: Option<SceneChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_ended: Option<bool>,
    /// Queued as a story event for the *next* turn (§3, §4.6).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub monster_events: Vec<serde_json::Value>,
    #[serde(default)]
    pub npc_events: Vec<serde_json::Value>,
}

impl GameStateDelta {
    pub fn is_empty(&self) -> bool {
        self.set_vars.is_empty()
            && self.unset_vars.is_empty()
            && self.add_inventory.is_empty()
            && self.remove_inventory.is_empty()
            && self.scene_change.is_none()
            && self.game_ended.is_none()
            && self.prompt.is_none()
            && self.monster_events.is_empty()
            && self.npc_events.is_empty()
    }

    /// Compose `self` followed by `other`: field-wise override (later
    /// wins), except `set_vars`/`add_inventory` which merge (§3).
    pub fn merge(mut self, other: GameStateDelta) -> GameStateDelta {
        self.set_vars.extend(other.set_vars);
        self.unset_vars.extend(other.unset_vars);

        for item in other.add_inventory {
            if !self.add_inventory.contains(&item) {
                self.add_inventory.push(item);
            }
        }
        self.remove_inventory.extend(other.remove_inventory);

        if other.scene_change.is_some() {
            self.scene_change = other.scene_change;
        }
        if other.game_ended.is_some() {
            self.game_ended = other.game_ended;
        }
        if other.prompt.is_some() {
            self.prompt = other.prompt;
        }
        self.monster_events.extend(other.monster_events);
        self.npc_events.extend(other.npc_events);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_unions_set_vars_keeping_later_value_on_conflict() {
        let a = GameStateDelta {
            set_vars: [("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())].into(),
            ..Default::default()
        };
        let b = GameStateDelta {
            set_vars: [("b".to_string(), "99".to_string())].into(),
            ..Default::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.set_vars.get("a").unwrap(), "1");
        assert_eq!(merged.set_vars.get("b").unwrap(), "99");
    }

    #[test]
    fn merge_dedupes_add_inventory() {
        let a = GameStateDelta {
            add_inventory: vec!["sword".to_string()],
            ..Default::default()
        };
        let b = GameStateDelta {
            add_inventory: vec!["sword".to_string(), "shield".to_string()],
            ..Default::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.add_inventory, vec!["sword".to_string(), "shield".to_string()]);
    }

    #[test]
    fn merge_takes_later_scene_change_and_game_ended() {
        let a = GameStateDelta {
            scene_change: Some(SceneChange { to: "first".to_string() }),
            game_ended: Some(false),
            ..Default::default()
        };
        let b = GameStateDelta {
            scene_change: Some(SceneChange { to: "second".to_string() }),
            ..Default::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.scene_change.unwrap().to, "second");
        // game_ended untouched by b since b didn't set it
        assert_eq!(merged.game_ended, Some(false));
    }

    #[test]
    fn empty_delta_reports_is_empty() {
        assert!(GameStateDelta::default().is_empty());
    }

    #[test]
    fn unset_optional_fields_are_absent_on_the_wire() {
        let delta = GameStateDelta::default();
        let json = serde_json::to_value(&delta).unwrap();
        assert!(json.get("scene_change").is_none());
        assert!(json.get("game_ended").is_none());
        assert!(json.get("prompt").is_none());
    }
}
