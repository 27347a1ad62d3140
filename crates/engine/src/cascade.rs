//! Conditional cascade (C7) — fires the scenario's `Conditional`s against
//! `GameState` to a fixed point: after applying every delta a cleared
//! condition produces, re-check everything once more in case the new state
//! makes a previously-false condition true. Bounded by
//! `max_conditional_iterations` since predicates and deltas are author
//! content and could otherwise oscillate forever (§4.7).
//!
//! Every conditional that fires within the same iteration is evaluated
//! against the state as of the *start* of that iteration, then their
//! deltas compose via `GameStateDelta::merge` (§3) and are applied once —
//! so one conditional's effect is only visible to another within the same
//! iteration if a later iteration re-checks it, not mid-iteration.

use storyforge_domain::{GameState, GameStateDelta, Scenario};

use crate::delta_worker;

pub struct CascadeOutcome {
    /// Story-event prompts queued by deltas fired during the cascade, in
    /// firing order.
    pub queued_story_events: Vec<String>,
    /// `true` if the cap was hit before the cascade reached a fixed point.
    pub hit_iteration_cap: bool,
}

/// Runs the cascade in place against `state`, consulting `scenario` for the
/// conditionals active in whatever scene is current *at the start of each
/// iteration* — a conditional firing a scene change takes effect for the
/// next iteration, never retroactively for the one in progress.
pub fn run(state: &mut GameState, scenario: &Scenario, max_iterations: usize) -> CascadeOutcome {
    let mut fired: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut queued_story_events = Vec::new();
    let mut hit_iteration_cap = false;

    for iteration in 0..max_iterations {
        let candidates = scenario.conditionals_for_scene(&state.scene_name);
        let mut combined: Option<GameStateDelta> = None;

        for conditional in candidates {
            if fired.contains(&conditional.id) {
                continue;
            }
            if conditional.when.holds(state) {
                fired.insert(conditional.id.clone());
                combined = Some(match combined {
                    Some(acc) => acc.merge(conditional.then.clone()),
                    None => conditional.then.clone(),
                });
            }
        }

        let fired_this_iteration = combined.is_some();
        if let Some(delta) = combined {
            let queued = delta_worker::apply(state, &delta, scenario);
            queued_story_events.extend(queued);
        }

        if !fired_this_iteration {
            break;
        }
        if iteration == max_iterations - 1 {
            hit_iteration_cap = true;
            tracing::warn!(
                game_id = %state.id,
                max_iterations,
                "conditional cascade hit iteration cap without reaching a fixed point"
            );
        }
    }

    CascadeOutcome {
        queued_story_events,
        hit_iteration_cap,
    }
}
