//! wordplay-cli: Command-line driver for Wordplay mini-game sessions.
//!
//! Plays sessions from flags or from JSON scripts, using the same session
//! scope, reward signal, and game shell the application surfaces use.

pub mod error;
pub mod play;
pub mod script;
