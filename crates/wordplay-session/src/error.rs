//! Error types for the wordplay-session crate.

use thiserror::Error;
use wordplay_core::{GameKind, SessionId};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session conflict: {active} is still running (session {session_id}), cannot start {requested}")]
    Conflict {
        session_id: SessionId,
        active: GameKind,
        requested: GameKind,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;
