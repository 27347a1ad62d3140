//! Port traits the turn-processing pipeline (`storyforge-engine`) depends
//! on: queue (C1), lock (C2), story-event queue (C3), game-state store
//! (C8), LLM capability (C9), event broadcaster (C10). Every adapter in
//! `storyforge-adapters` implements one or more of these.

pub mod outbound;

pub use outbound::*;
