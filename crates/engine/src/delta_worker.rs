//! Delta worker (C6) — validates and applies a `GameStateDelta` to a
//! `GameState`, in the field order §4.6 mandates: `set_vars` → `unset_vars`
//! → inventory → scene → ended → monster/npc events → story-event
//! queueing. That order matters: it's why `when` predicates evaluated in
//! the next cascade iteration see the most recent vars.

use storyforge_domain::{GameState, GameStateDelta, Scenario};

/// Applies `delta` to `state` in place and returns any prompts the delta
/// wants queued as story events for the *next* turn (§3, §4.6). Queueing
/// itself is the caller's job (it needs the story-event queue port); this
/// function stays pure so the cascade can be tested without I/O.
pub fn apply(state: &mut GameState, delta: &GameStateDelta, scenario: &Scenario) -> Vec<String> {
    for (key, value) in &delta.set_vars {
        state.vars.insert(key.clone(), value.clone());
    }

    for key in &delta.unset_vars {
        state.vars.remove(key);
    }

    for item in &delta.add_inventory {
        if !state.inventory.contains(item) {
            state.inventory.push(item.clone());
        }
    }
    state
        .inventory
        .retain(|item| !delta.remove_inventory.contains(item));

    if let Some(change) = &delta.scene_change {
        if scenario.scenes.contains_key(&change.to) {
            state.scene_name = change.to.clone();
            state.turn_counters.remove(&change.to);
        } else {
            tracing::warn!(scene = %change.to, "delta references unknown scene, skipping scene change");
        }
    }

    // `game_ended: true` is irreversible within a turn: a later delta in
    // the same cascade cannot flip it back to false.
    match delta.game_ended {
        Some(true) => state.is_ended = true,
        Some(false) if !state.is_ended => state.is_ended = false,
        _ => {}
    }

    state.monster_events.extend(delta.monster_events.iter().cloned());
    state.npc_events.extend(delta.npc_events.iter().cloned());

    delta.prompt.clone().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use storyforge_domain::{GameStateId, Scene, ScenarioId, SceneChange};

    fn scenario_with_scenes(names: &[&str]) -> Scenario {
        let mut scenes = HashMap::new();
        for name in names {
            scenes.insert(name.to_string(), Scene::new());
        }
        Scenario {
            name: "test".to_string(),
            opening_prompt: String::new(),
            contingency_rules: Vec::new(),
            scenes,
            default_pc: None,
        }
    }

    fn state(scene: &str) -> GameState {
        GameState::new(GameStateId::new(), ScenarioId::new(), scene)
    }

    #[test]
    fn set_vars_overrides_existing_keys() {
        let mut state = state("intro");
        state.vars.insert("hp".to_string(), "10".to_string());
        let delta = GameStateDelta {
            set_vars: [("hp".to_string(), "20".to_string())].into(),
            ..Default::default()
        };
        apply(&mut state, &delta, &scenario_with_scenes(&["intro"]));
        assert_eq!(state.vars.get("hp").unwrap(), "20");
    }

    #[test]
    fn empty_string_values_are_a_legal_reset() {
        let mut state = state("intro");
        let delta = GameStateDelta {
            set_vars: [("flag".to_string(), String::new())].into(),
            ..Default::default()
        };
        apply(&mut state, &delta, &scenario_with_scenes(&["intro"]));
        assert_eq!(state.vars.get("flag").unwrap(), "");
    }

    #[test]
    fn unset_vars_removes_keys_after_set_vars_applied() {
        let mut state = state("intro");
        let delta = GameStateDelta {
            set_vars: [("temp".to_string(), "x".to_string())].into(),
            unset_vars: vec!["temp".to_string()],
            ..Default::default()
        };
        apply(&mut state, &delta, &scenario_with_scenes(&["intro"]));
        assert!(!state.vars.contains_key("temp"));
    }

    #[test]
    fn inventory_add_is_union_remove_is_difference() {
        let mut state = state("intro");
        state.inventory = vec!["torch".to_string()];
        let delta = GameStateDelta {
            add_inventory: vec!["torch".to_string(), "sword".to_string()],
            remove_inventory: vec!["torch".to_string()],
            ..Default::default()
        };
        apply(&mut state, &delta, &scenario_with_scenes(&["intro"]));
        assert_eq!(state.inventory, vec!["sword".to_string()]);
    }

    #[test]
    fn unknown_scene_in_delta_is_skipped_not_errored() {
        let mut state = state("intro");
        let delta = GameStateDelta {
            scene_change: Some(SceneChange {
                to: "nowhere".to_string(),
            }),
            ..Default::default()
        };
        apply(&mut state, &delta, &scenario_with_scenes(&["intro"]));
        assert_eq!(state.scene_name, "intro");
    }

    #[test]
    fn known_scene_change_updates_scene_and_resets_its_counter() {
        let mut state = state("intro");
        state.turn_counters.insert("throne_room".to_string(), 7);
        let delta = GameStateDelta {
            scene_change: Some(SceneChange {
                to: "throne_room".to_string(),
            }),
            ..Default::default()
        };
        apply(&mut state, &delta, &scenario_with_scenes(&["intro", "throne_room"]));
        assert_eq!(state.scene_name, "throne_room");
        assert!(!state.turn_counters.contains_key("throne_room"));
    }

    #[test]
    fn game_ended_true_cannot_be_reopened_by_a_later_false() {
        let mut state = state("intro");
        let scenario = scenario_with_scenes(&["intro"]);
        apply(
            &mut state,
            &GameStateDelta {
                game_ended: Some(true),
                ..Default::default()
            },
            &scenario,
        );
        apply(
            &mut state,
            &GameStateDelta {
                game_ended: Some(false),
                ..Default::default()
            },
            &scenario,
        );
        assert!(state.is_ended);
    }

    #[test]
    fn prompt_is_returned_for_the_caller_to_queue() {
        let mut state = state("intro");
        let delta = GameStateDelta {
            prompt: Some("a storm approaches".to_string()),
            ..Default::default()
        };
        let queued = apply(&mut state, &delta, &scenario_with_scenes(&["intro"]));
        assert_eq!(queued, vec!["a storm approaches".to_string()]);
    }

    #[test]
    fn delta_with_no_prompt_queues_nothing() {
        let mut state = state("intro");
        let queued = apply(&mut state, &GameStateDelta::default(), &scenario_with_scenes(&["intro"]));
        assert!(queued.is_empty());
    }
}
