pub mod broadcast_port;
pub mod game_state_store_port;
pub mod llm_port;
pub mod lock_port;
pub mod queue_port;
pub mod scenario_provider_port;
pub mod story_event_queue_port;

pub use broadcast_port::{BroadcastPort, LifecycleEvent, LifecycleKind};
pub use game_state_store_port::{GameStateStorePort, StoreError};
pub use llm_port::{ChatResponse, DeltaUpdateResponse, LlmError, LlmMessage, LlmPort};
pub use lock_port::{LockError, LockPort};
pub use queue_port::{QueueError, QueuePort};
pub use scenario_provider_port::{ScenarioProviderError, ScenarioProviderPort};
pub use story_event_queue_port::{StoryEventQueueError, StoryEventQueuePort, STORY_EVENT_PREFIX};

#[cfg(any(test, feature = "testing"))]
pub use broadcast_port::MockBroadcastPort;
#[cfg(any(test, feature = "testing"))]
pub use game_state_store_port::MockGameStateStorePort;
#[cfg(any(test, feature = "testing"))]
pub use llm_port::MockLlmPort;
#[cfg(any(test, feature = "testing"))]
pub use lock_port::MockLockPort;
#[cfg(any(test, feature = "testing"))]
pub use queue_port::MockQueuePort;
#[cfg(any(test, feature = "testing"))]
pub use scenario_provider_port::MockScenarioProviderPort;
#[cfg(any(test, feature = "testing"))]
pub use story_event_queue_port::MockStoryEventQueuePort;
