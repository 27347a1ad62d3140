//! Deterministic LLM double (C9) for tests and local development without a
//! provider key. `chat` echoes a canned line; `delta_update` returns a
//! scripted delta if one was configured, otherwise an empty one.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use storyforge_domain::GameStateDelta;
use storyforge_ports::{ChatResponse, DeltaUpdateResponse, LlmError, LlmMessage, LlmPort};

pub struct NullLlm {
    chat_response: String,
    scripted_deltas: Mutex<VecDeque<GameStateDelta>>,
}

impl NullLlm {
    pub fn new(chat_response: impl Into<String>) -> Self {
        Self {
            chat_response: chat_response.into(),
            scripted_deltas: Mutex::new(VecDeque::new()),
        }
    }

    /// Deltas are consumed front-to-back, one per `delta_update` call; once
    /// exhausted, further calls return an empty delta.
    pub fn with_scripted_deltas(mut self, deltas: Vec<GameStateDelta>) -> Self {
        self.scripted_deltas = Mutex::new(deltas.into());
        self
    }
}

impl Default for NullLlm {
    fn default() -> Self {
        Self::new("You see a room.")
    }
}

#[async_trait]
impl LlmPort for NullLlm {
    async fn chat(&self, _messages: Vec<LlmMessage>, _deadline: Duration) -> Result<ChatResponse, LlmError> {
        Ok(ChatResponse {
            text: self.chat_response.clone(),
        })
    }

    async fn delta_update(
        &self,
        _messages: Vec<LlmMessage>,
        _deadline: Duration,
    ) -> Result<DeltaUpdateResponse, LlmError> {
        let mut deltas = self
            .scripted_deltas
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(DeltaUpdateResponse {
            delta: deltas.pop_front().unwrap_or_default(),
            backend_model: "null-llm".to_string(),
        })
    }
}
