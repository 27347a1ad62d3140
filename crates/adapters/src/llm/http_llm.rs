//! Reference HTTP LLM driver (C9) — demonstrates the capability boundary
//! against a generic chat-completions-shaped endpoint. Concrete provider
//! drivers are explicitly out of the core's scope (§1); this exists to show
//! the port is implementable, not as a production integration.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storyforge_domain::GameStateDelta;
use storyforge_ports::{ChatResponse, DeltaUpdateResponse, LlmError, LlmMessage, LlmPort};

pub struct HttpLlm {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpLlm {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

fn role_str(role: storyforge_domain::ChatRole) -> &'static str {
    match role {
        storyforge_domain::ChatRole::System => "system",
        storyforge_domain::ChatRole::User => "user",
        storyforge_domain::ChatRole::Agent => "assistant",
    }
}

impl HttpLlm {
    async fn complete(&self, messages: &[LlmMessage], deadline: Duration) -> Result<String, LlmError> {
        let wire_messages: Vec<WireMessage> = messages
            .iter()
            .map(|m| WireMessage {
                role: role_str(m.role),
                content: &m.content,
            })
            .collect();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages: wire_messages,
            })
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Transient(e.to_string())
                }
            })?;

        if response.status().is_server_error() {
            return Err(LlmError::Transient(response.status().to_string()));
        }
        if !response.status().is_success() {
            return Err(LlmError::Terminal(response.status().to_string()));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Terminal(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Terminal("empty choices array".to_string()))
    }
}

#[async_trait]
impl LlmPort for HttpLlm {
    async fn chat(&self, messages: Vec<LlmMessage>, deadline: Duration) -> Result<ChatResponse, LlmError> {
        let text = self.complete(&messages, deadline).await?;
        Ok(ChatResponse { text })
    }

    async fn delta_update(
        &self,
        messages: Vec<LlmMessage>,
        deadline: Duration,
    ) -> Result<DeltaUpdateResponse, LlmError> {
        let text = self.complete(&messages, deadline).await?;
        let delta: GameStateDelta =
            serde_json::from_str(&text).map_err(|e| LlmError::SchemaViolation(e.to_string()))?;
        Ok(DeltaUpdateResponse {
            delta,
            backend_model: self.model.clone(),
        })
    }
}
