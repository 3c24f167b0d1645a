//! wordplay-core: Shared types, events, configuration, and error handling for Wordplay.
//!
//! This crate provides the foundational types used across all Wordplay components:
//! - Session identifiers, game kinds, and the opaque options bag
//! - Round outcomes, running counters, and completion statistics
//! - Session events delivered to observers
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use crate::config::{ConflictPolicy, RewardConfig, SessionConfig, WordplayConfig};
pub use error::WordplayError;
pub use events::{EventPayload, SessionEvent};
pub use types::{CompletionStats, GameKind, GameOptions, RoundCounters, RoundOutcome, SessionId};
