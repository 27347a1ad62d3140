//! Concrete implementations of `storyforge-ports`' outbound traits. Each
//! submodule ships an in-process implementation usable without any external
//! service, plus (behind feature flags) the reference durable/network
//! transports.

pub mod broadcast;
pub mod lock;
pub mod llm;
pub mod queues;
pub mod scenarios;
pub mod store;
pub mod story_events;

pub use broadcast::TokioBroadcast;
pub use lock::InMemoryLock;
pub use llm::NullLlm;
pub use queues::InMemoryQueue;
pub use scenarios::InMemoryScenarioProvider;
pub use store::InMemoryGameStateStore;
pub use story_events::InMemoryStoryEventQueue;
