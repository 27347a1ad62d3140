//! Inbound work items: `Request` is the unit the queue (C1) transports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{GameStateId, RequestId};

/// A request produced by a producer and consumed exactly once by a worker.
///
/// Immutable once constructed; common fields plus one variant's worth of
/// payload, tagged by `type` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub request_id: RequestId,
    pub game_state_id: GameStateId,
    pub enqueued_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: RequestKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestKind {
    Chat {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actor: Option<String>,
    },
    StoryEvent {
        event_prompt: String,
    },
}

impl Request {
    pub fn new_chat(game_state_id: GameStateId, message: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            game_state_id,
            enqueued_at: Utc::now(),
            kind: RequestKind::Chat {
                message: message.into(),
                actor: None,
            },
        }
    }

    pub fn new_story_event(game_state_id: GameStateId, event_prompt: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            game_state_id,
            enqueued_at: Utc::now(),
            kind: RequestKind::StoryEvent {
                event_prompt: event_prompt.into(),
            },
        }
    }
}
