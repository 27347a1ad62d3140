pub mod tokio_broadcast;

pub use tokio_broadcast::TokioBroadcast;
