//! The session store: single owner of the active mini-game session.
//!
//! The store is a plain state machine. Each operation mutates the session
//! and returns the events it produced; publishing them to observers and
//! firing completion callbacks is left to the caller (see `accessor`), so
//! neither ever runs while the store is mid-transition.

use chrono::{DateTime, Utc};
use serde::Serialize;

use wordplay_core::{
    CompletionStats, ConflictPolicy, EventPayload, GameKind, GameOptions, RoundCounters,
    RoundOutcome, SessionConfig, SessionEvent, SessionId,
};

use crate::aggregate;
use crate::error::{Result, SessionError};

/// Invoked once with the final statistics when a session is ended.
pub type CompletionCallback = Box<dyn FnOnce(CompletionStats)>;

/// One run of a mini-game.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    kind: GameKind,
    options: GameOptions,
    counters: RoundCounters,
    started_at: DateTime<Utc>,
}

impl GameSession {
    fn start(kind: GameKind, options: GameOptions) -> Self {
        Self {
            id: SessionId::new(),
            kind,
            options,
            counters: RoundCounters::default(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> &GameKind {
        &self.kind
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn counters(&self) -> RoundCounters {
        self.counters
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn event(&self, payload: EventPayload) -> SessionEvent {
        SessionEvent::new(self.id, self.kind.clone(), payload)
    }
}

/// Read-only view of the store for UI surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Option<SessionId>,
    pub active_game: Option<GameKind>,
    pub counters: RoundCounters,
}

struct ActiveSession {
    session: GameSession,
    on_complete: Option<CompletionCallback>,
}

/// A session that `end_game` just closed.
pub struct ClosedSession {
    session: GameSession,
    stats: CompletionStats,
    on_complete: Option<CompletionCallback>,
}

impl ClosedSession {
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn stats(&self) -> CompletionStats {
        self.stats
    }

    /// Hand the statistics to the completion callback, if one was given.
    pub fn complete(self) -> CompletionStats {
        if let Some(callback) = self.on_complete {
            callback(self.stats);
        }
        self.stats
    }
}

/// Holds at most one active [`GameSession`].
pub struct SessionStore {
    policy: ConflictPolicy,
    active: Option<ActiveSession>,
}

impl SessionStore {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            active: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.conflict_policy)
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Start a new session with zeroed counters.
    ///
    /// The options are copied; later changes to the caller's bag do not
    /// reach the running session. If a session is already active the
    /// store's [`ConflictPolicy`] decides: `Supersede` abandons it (its
    /// callback is dropped unfired), `Reject` returns
    /// [`SessionError::Conflict`] and leaves it running.
    pub fn start_game(
        &mut self,
        kind: GameKind,
        options: &GameOptions,
        on_complete: Option<CompletionCallback>,
    ) -> Result<Vec<SessionEvent>> {
        let mut events = Vec::with_capacity(2);

        if let Some(current) = &self.active {
            if self.policy == ConflictPolicy::Reject {
                tracing::debug!(
                    session_id = %current.session.id,
                    active = %current.session.kind,
                    requested = %kind,
                    "Rejecting start_game while a session is active"
                );
                return Err(SessionError::Conflict {
                    session_id: current.session.id,
                    active: current.session.kind.clone(),
                    requested: kind,
                });
            }
        }

        let session = GameSession::start(kind, options.clone());
        let superseded = self.active.take().map(|previous| {
            tracing::info!(
                session_id = %previous.session.id,
                kind = %previous.session.kind,
                replaced_by = %session.id,
                "Session abandoned"
            );
            events.push(previous.session.event(EventPayload::GameAbandoned {
                counters: previous.session.counters,
                replaced_by: session.id,
            }));
            previous.session.id
        });

        tracing::info!(
            session_id = %session.id,
            kind = %session.kind,
            option_count = session.options.len(),
            "Session started"
        );
        events.push(session.event(EventPayload::GameStarted {
            options: session.options.clone(),
            superseded,
        }));

        self.active = Some(ActiveSession {
            session,
            on_complete,
        });

        Ok(events)
    }

    /// Close the active session. Returns `None` when idle.
    pub fn end_game(&mut self) -> Option<(ClosedSession, SessionEvent)> {
        let Some(active) = self.active.take() else {
            tracing::trace!("end_game with no active session");
            return None;
        };

        let stats = aggregate::completion_stats(&active.session.counters);
        let event = active
            .session
            .event(EventPayload::GameCompleted { stats });

        tracing::info!(
            session_id = %active.session.id,
            kind = %active.session.kind,
            correct = stats.correct,
            total_rounds = stats.total_rounds,
            best_streak = stats.best_streak,
            "Session completed"
        );

        let closed = ClosedSession {
            session: active.session,
            stats,
            on_complete: active.on_complete,
        };
        Some((closed, event))
    }

    /// Apply a round outcome. Returns `None` (and changes nothing) when idle.
    pub fn report(&mut self, outcome: RoundOutcome) -> Option<SessionEvent> {
        let Some(active) = self.active.as_mut() else {
            tracing::trace!(?outcome, "Stray round report ignored");
            return None;
        };

        let session = &mut active.session;
        session.counters = aggregate::advance(session.counters, outcome);

        tracing::debug!(
            session_id = %session.id,
            ?outcome,
            score = session.counters.score,
            attempts = session.counters.attempts,
            streak = session.counters.current_streak,
            "Round reported"
        );

        Some(session.event(EventPayload::RoundReported {
            outcome,
            counters: session.counters,
        }))
    }

    pub fn report_success(&mut self) -> Option<SessionEvent> {
        self.report(RoundOutcome::Success)
    }

    pub fn report_fail(&mut self) -> Option<SessionEvent> {
        self.report(RoundOutcome::Failure)
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        match self.session() {
            Some(session) => SessionSnapshot {
                session_id: Some(session.id),
                active_game: Some(session.kind.clone()),
                counters: session.counters,
            },
            None => SessionSnapshot::default(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_callback() -> (Rc<Cell<u32>>, CompletionCallback) {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let callback: CompletionCallback = Box::new(move |_| seen.set(seen.get() + 1));
        (calls, callback)
    }

    #[test]
    fn start_zeroes_counters() {
        let mut store = SessionStore::default();
        let events = store
            .start_game("match".into(), &GameOptions::new().with("rounds", 10), None)
            .unwrap();

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].payload,
            EventPayload::GameStarted {
                superseded: None,
                ..
            }
        ));

        let session = store.session().unwrap();
        assert_eq!(session.kind().as_str(), "match");
        assert_eq!(session.options().rounds(), Some(10));
        assert_eq!(session.counters(), RoundCounters::default());
    }

    #[test]
    fn options_are_copied_at_start() {
        let mut store = SessionStore::default();
        let mut options = GameOptions::new().with("rounds", 10);
        store.start_game("match".into(), &options, None).unwrap();

        options.insert("rounds", 99);
        assert_eq!(store.session().unwrap().options().rounds(), Some(10));
    }

    #[test]
    fn reports_update_counters() {
        let mut store = SessionStore::default();
        store
            .start_game("match".into(), &GameOptions::new(), None)
            .unwrap();

        store.report_success();
        store.report_success();
        let event = store.report_fail().unwrap();

        assert_eq!(event.round_outcome(), Some(RoundOutcome::Failure));
        let counters = store.snapshot().counters;
        assert_eq!(counters.score, 2);
        assert_eq!(counters.attempts, 3);
        assert_eq!(counters.current_streak, 0);
        assert_eq!(counters.best_streak, 2);
    }

    #[test]
    fn stray_reports_are_ignored() {
        let mut store = SessionStore::default();
        assert!(store.report_success().is_none());
        assert!(store.report_fail().is_none());
        assert!(!store.is_active());
        assert_eq!(store.snapshot(), SessionSnapshot::default());
    }

    #[test]
    fn end_game_when_idle_is_noop() {
        let mut store = SessionStore::default();
        assert!(store.end_game().is_none());
    }

    #[test]
    fn end_game_fires_callback_once() {
        let mut store = SessionStore::default();
        let (calls, callback) = counting_callback();
        store
            .start_game("match".into(), &GameOptions::new(), Some(callback))
            .unwrap();
        store.report_success();

        let (closed, event) = store.end_game().unwrap();
        assert!(matches!(event.payload, EventPayload::GameCompleted { .. }));
        assert_eq!(calls.get(), 0);

        let stats = closed.complete();
        assert_eq!(calls.get(), 1);
        assert_eq!(stats.correct, 1);
        assert!(!store.is_active());
        assert!(store.end_game().is_none());
    }

    #[test]
    fn supersede_abandons_previous_session() {
        let mut store = SessionStore::new(ConflictPolicy::Supersede);
        let (calls, callback) = counting_callback();
        store
            .start_game("match".into(), &GameOptions::new(), Some(callback))
            .unwrap();
        store.report_success();
        let first = store.session().unwrap().id();

        let events = store
            .start_game("spell".into(), &GameOptions::new(), None)
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0].payload,
            EventPayload::GameAbandoned { .. }
        ));
        assert_eq!(events[0].session_id, first);
        match &events[1].payload {
            EventPayload::GameStarted { superseded, .. } => assert_eq!(*superseded, Some(first)),
            other => panic!("unexpected payload: {other:?}"),
        }

        let session = store.session().unwrap();
        assert_ne!(session.id(), first);
        assert_eq!(session.kind().as_str(), "spell");
        assert_eq!(session.counters(), RoundCounters::default());
        // Abandoned, not completed.
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn reject_keeps_running_session() {
        let mut store = SessionStore::new(ConflictPolicy::Reject);
        store
            .start_game("match".into(), &GameOptions::new(), None)
            .unwrap();
        store.report_success();

        let err = store
            .start_game("spell".into(), &GameOptions::new(), None)
            .unwrap_err();
        assert!(matches!(err, SessionError::Conflict { .. }));
        assert!(err.to_string().contains("cannot start spell"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.active_game, Some(GameKind::new("match")));
        assert_eq!(snapshot.counters.score, 1);

        // Once the first session ends, starting is allowed again.
        store.end_game();
        assert!(store
            .start_game("spell".into(), &GameOptions::new(), None)
            .is_ok());
    }

    #[test]
    fn from_config_uses_policy() {
        let config = SessionConfig {
            conflict_policy: ConflictPolicy::Reject,
        };
        assert_eq!(
            SessionStore::from_config(&config).policy(),
            ConflictPolicy::Reject
        );
    }
}
