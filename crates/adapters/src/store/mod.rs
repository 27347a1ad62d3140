pub mod memory_store;
#[cfg(feature = "sqlite")]
pub mod sqlite_store;

pub use memory_store::InMemoryGameStateStore;
#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteGameStateStore;
