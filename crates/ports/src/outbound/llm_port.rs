//! LLM capability port (C9) — `chat` and `delta_update`, the two abstract
//! operations the core consumes. Concrete provider drivers live behind this
//! boundary and are out of scope for the core itself (§1, §4.9).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storyforge_domain::{ChatRole, GameStateDelta};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: ChatRole,
    pub content: String,
}

impl LlmMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct DeltaUpdateResponse {
    pub delta: GameStateDelta,
    pub backend_model: String,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("request timed out")]
    Timeout,
    #[error("transient provider error: {0}")]
    Transient(String),
    #[error("terminal provider error: {0}")]
    Terminal(String),
    #[error("response violated the delta schema: {0}")]
    SchemaViolation(String),
}

impl LlmError {
    /// Classifies whether the caller's retry policy (§4.9, §7) should kick
    /// in: timeouts and transient errors are retriable, refusals and
    /// schema violations are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Timeout | LlmError::Transient(_))
    }
}

/// Both operations must honor the caller-supplied `deadline`. The core's
/// retry policy lives in the chat processor (C5), not here: `chat` gets no
/// automatic retry, `delta_update` gets exactly one (§4.9).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn chat(
        &self,
        messages: Vec<LlmMessage>,
        deadline: Duration,
    ) -> Result<ChatResponse, LlmError>;

    async fn delta_update(
        &self,
        messages: Vec<LlmMessage>,
        deadline: Duration,
    ) -> Result<DeltaUpdateResponse, LlmError>;
}
