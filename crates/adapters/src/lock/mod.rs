pub mod memory_lock;
#[cfg(feature = "sqlite")]
pub mod sqlite_lock;

pub use memory_lock::InMemoryLock;
#[cfg(feature = "sqlite")]
pub use sqlite_lock::SqliteLock;
