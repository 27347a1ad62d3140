//! Event broadcaster port (C10) — lifecycle events for observers (SSE, etc).

use serde::{Deserialize, Serialize};
use storyforge_domain::{GameStateId, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleKind {
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub kind: LifecycleKind,
    pub game_id: GameStateId,
    pub request_id: RequestId,
    pub detail: String,
}

/// Broadcaster failures never block turn processing (§4.10) — the port
/// itself has no fallible methods; a publish that can't reach a subscriber
/// is the adapter's problem to swallow and log, not the caller's.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait BroadcastPort: Send + Sync {
    fn publish(&self, event: LifecycleEvent);
}
