//! Request-dispatch and turn-processing pipeline: the worker loop (C4), the
//! two-phase chat processor (C5), the delta worker (C6), and the
//! conditional cascade (C7). Everything here is storage-agnostic — it talks
//! to `storyforge-ports` traits, never to a concrete adapter.

pub mod cascade;
pub mod chat_processor;
pub mod config;
pub mod delta_worker;
pub mod worker;

pub use chat_processor::ChatProcessor;
pub use config::EngineConfig;
pub use worker::{RequestHandler, Worker};
