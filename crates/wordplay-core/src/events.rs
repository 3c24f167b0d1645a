//! Session events delivered to observers.
//!
//! Every state transition of the session store produces exactly one event.
//! Observers (reward signal, game shell, UI surfaces, the CLI event log)
//! receive them synchronously, in the order the transitions happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CompletionStats, GameKind, GameOptions, RoundCounters, RoundOutcome, SessionId};

/// Unique identifier for an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// An event emitted by the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub id: EventId,
    pub session_id: SessionId,
    pub kind: GameKind,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

impl SessionEvent {
    pub fn new(session_id: SessionId, kind: GameKind, payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            session_id,
            kind,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Round outcome carried by this event, if it is a round report.
    pub fn round_outcome(&self) -> Option<RoundOutcome> {
        match &self.payload {
            EventPayload::RoundReported { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }
}

/// The event payload, tagged by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum EventPayload {
    /// A session became active.
    GameStarted {
        options: GameOptions,
        /// Session that was abandoned to make room for this one.
        superseded: Option<SessionId>,
    },
    /// The hosted game reported a round.
    RoundReported {
        outcome: RoundOutcome,
        counters: RoundCounters,
    },
    /// The session was ended and its statistics handed to the caller.
    GameCompleted { stats: CompletionStats },
    /// The session was dropped without completing (no callback fired).
    GameAbandoned {
        counters: RoundCounters,
        replaced_by: SessionId,
    },
}
