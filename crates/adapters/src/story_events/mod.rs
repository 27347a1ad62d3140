pub mod memory_story_event_queue;

pub use memory_story_event_queue::InMemoryStoryEventQueue;
