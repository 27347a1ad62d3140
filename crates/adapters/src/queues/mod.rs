pub mod memory_queue;
#[cfg(feature = "sqlite")]
pub mod sqlite_queue;

pub use memory_queue::InMemoryQueue;
#[cfg(feature = "sqlite")]
pub use sqlite_queue::SqliteQueue;
