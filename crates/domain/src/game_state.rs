//! The per-game aggregate owned by the game-state store (C8).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{GameStateId, ScenarioId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
}

impl ChatEntry {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Per-game aggregate, mutated only while the per-game lock (C2) is held.
///
/// `monster_events`/`npc_events` are opaque per the core's non-goals: they
/// accumulate as a scratch log so callers can read them back, but the core
/// never interprets their contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameStateId,
    pub scenario_id: ScenarioId,
    pub scene_name: String,
    pub chat_history: Vec<ChatEntry>,
    pub vars: HashMap<String, String>,
    pub turn_counters: HashMap<String, i64>,
    pub inventory: Vec<String>,
    pub is_ended: bool,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub monster_events: Vec<serde_json::Value>,
    #[serde(default)]
    pub npc_events: Vec<serde_json::Value>,
}

impl GameState {
    pub fn new(id: GameStateId, scenario_id: ScenarioId, scene_name: impl Into<String>) -> Self {
        Self {
            id,
            scenario_id,
            scene_name: scene_name.into(),
            chat_history: Vec::new(),
            vars: HashMap::new(),
            turn_counters: HashMap::new(),
            inventory: Vec::new(),
            is_ended: false,
            updated_at: Utc::now(),
            monster_events: Vec::new(),
            npc_events: Vec::new(),
        }
    }

    /// Turn count used by `min_turns` predicates: the scenario-wide total,
    /// keyed `"total"` alongside any per-scene counters C6 maintains.
    pub fn total_turns(&self) -> i64 {
        self.turn_counters.get("total").copied().unwrap_or(0)
    }

    pub fn append_exchange(&mut self, user_message: impl Into<String>, agent_response: impl Into<String>) {
        self.chat_history.push(ChatEntry::new(ChatRole::User, user_message));
        self.chat_history.push(ChatEntry::new(ChatRole::Agent, agent_response));
    }

    /// Last `limit` exchanges (each exchange is up to two entries), oldest first.
    pub fn history_window(&self, limit: usize) -> &[ChatEntry] {
        let take = (limit * 2).min(self.chat_history.len());
        &self.chat_history[self.chat_history.len() - take..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_exchange_adds_user_then_agent() {
        let mut state = GameState::new(GameStateId::new(), ScenarioId::new(), "intro");
        state.append_exchange("hi", "hello there");
        assert_eq!(state.chat_history.len(), 2);
        assert_eq!(state.chat_history[0].role, ChatRole::User);
        assert_eq!(state.chat_history[1].role, ChatRole::Agent);
    }

    #[test]
    fn history_window_caps_at_limit_exchanges() {
        let mut state = GameState::new(GameStateId::new(), ScenarioId::new(), "intro");
        for i in 0..10 {
            state.append_exchange(format!("msg{i}"), format!("reply{i}"));
        }
        let window = state.history_window(2);
        assert_eq!(window.len(), 4);
        assert_eq!(window[0].content, "msg8");
    }

    #[test]
    fn round_trips_through_json_modulo_nothing() {
        let mut state = GameState::new(GameStateId::new(), ScenarioId::new(), "intro");
        state.vars.insert("score".to_string(), "10".to_string());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
