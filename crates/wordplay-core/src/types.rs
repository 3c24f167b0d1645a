//! Core domain types for Wordplay mini-game sessions.
//!
//! These types are shared by the session orchestrator, the hosted games,
//! and the surfaces that launch games and display their results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Result, WordplayError};

// ── Session ───────────────────────────────────────────────────────

/// Unique identifier for one run of a mini-game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which mini-game a session is running (e.g. "match", "spell", "listen").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GameKind(String);

impl GameKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Options ───────────────────────────────────────────────────────

/// Opaque configuration bag handed to the active game.
///
/// The orchestrator never validates the contents; it only copies the bag
/// when a session starts. The typed getters are conveniences for hosted
/// games and return `None` when a key is missing or has the wrong shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct GameOptions(Map<String, Value>);

impl GameOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Parse a `key=value` pair. The value is read as JSON when it parses
    /// (`rounds=10`, `shuffle=true`), otherwise kept as a plain string.
    pub fn insert_pair(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| WordplayError::InvalidOption(format!("expected key=value, got {raw:?}")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(WordplayError::InvalidOption(format!("empty key in {raw:?}")));
        }
        let value = serde_json::from_str(value.trim())
            .unwrap_or_else(|_| Value::String(value.trim().to_string()));
        self.0.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of rounds the launching surface asked for.
    pub fn rounds(&self) -> Option<u32> {
        self.get("rounds")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.get("difficulty").and_then(Value::as_str)
    }

    /// Number of pictures or answers offered per round.
    pub fn choices_per_round(&self) -> Option<u32> {
        self.get("choices")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Rounds ────────────────────────────────────────────────────────

/// Result of one scored attempt within a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Success,
    Failure,
}

impl RoundOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<bool> for RoundOutcome {
    fn from(correct: bool) -> Self {
        if correct {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Running counters for the active session.
///
/// Always satisfies `attempts >= score`, `best_streak >= current_streak`,
/// and `best_streak <= attempts`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundCounters {
    /// Rounds reported successful.
    pub score: u32,
    /// All rounds reported (success + failure).
    pub attempts: u32,
    /// Consecutive successes ending at the most recent round.
    pub current_streak: u32,
    /// Longest streak observed in the session.
    pub best_streak: u32,
}

/// Summary handed to the launching surface when a session completes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionStats {
    pub correct: u32,
    pub total_rounds: u32,
    pub best_streak: u32,
}

impl CompletionStats {
    /// Share of rounds answered correctly (0.0 when nothing was played).
    pub fn accuracy(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total_rounds)
        }
    }
}
