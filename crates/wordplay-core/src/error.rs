use thiserror::Error;

/// Top-level error type for Wordplay.
#[derive(Error, Debug)]
pub enum WordplayError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid game option: {0}")]
    InvalidOption(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WordplayError>;
