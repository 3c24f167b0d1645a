//! Error types for the wordplay-cli crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid outcome {0:?}: use '+' for a correct round and '-' for a miss")]
    InvalidOutcome(char),

    #[error("Invalid conflict policy: {0}. Choose: supersede, reject")]
    InvalidPolicy(String),

    #[error(transparent)]
    Wordplay(#[from] wordplay_core::WordplayError),

    #[error(transparent)]
    Session(#[from] wordplay_session::SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
