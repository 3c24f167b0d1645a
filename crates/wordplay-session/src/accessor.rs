//! Session accessor: the one way the application reaches the session store.
//!
//! A [`SessionScope`] owns a store and its observers. Accessors handed out
//! by the scope hold only a weak reference, so once the scope is dropped
//! they quietly behave like [`InertSessions`]. Code that runs without any
//! scope gets an inert accessor from [`resolve`] directly. Either way the
//! caller sees the same [`GameSessions`] interface.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use wordplay_core::{
    CompletionStats, ConflictPolicy, GameKind, GameOptions, RoundOutcome, SessionConfig,
    SessionEvent,
};

use crate::error::Result;
use crate::observer::{deliver, ObserverRegistry, SharedObserver, SubscriptionId};
use crate::store::{ClosedSession, CompletionCallback, SessionSnapshot, SessionStore};

/// Operations available to launching surfaces, hosted games, and UI.
pub trait GameSessions {
    /// Start a session; `on_complete` fires once when it is ended.
    fn start_game_with(
        &self,
        kind: GameKind,
        options: &GameOptions,
        on_complete: Option<CompletionCallback>,
    ) -> Result<()>;

    /// End the active session and return its statistics (`None` when idle).
    ///
    /// Called from inside an observer, the `GameCompleted` event and the
    /// completion callback run after the current delivery finishes.
    fn end_game(&self) -> Option<CompletionStats>;

    /// Report one round. Ignored when no session is active.
    fn report(&self, outcome: RoundOutcome);

    fn snapshot(&self) -> SessionSnapshot;

    fn subscribe(&self, observer: SharedObserver) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    fn start_game(&self, kind: GameKind, options: &GameOptions) -> Result<()> {
        self.start_game_with(kind, options, None)
    }

    fn report_success(&self) {
        self.report(RoundOutcome::Success)
    }

    fn report_fail(&self) {
        self.report(RoundOutcome::Failure)
    }

    fn active_game(&self) -> Option<GameKind> {
        self.snapshot().active_game
    }

    fn is_active(&self) -> bool {
        self.snapshot().active_game.is_some()
    }

    fn score(&self) -> u32 {
        self.snapshot().counters.score
    }

    fn attempts(&self) -> u32 {
        self.snapshot().counters.attempts
    }

    fn current_streak(&self) -> u32 {
        self.snapshot().counters.current_streak
    }

    fn best_streak(&self) -> u32 {
        self.snapshot().counters.best_streak
    }
}

/// Shared handle to whichever implementation is in effect.
pub type SessionAccessor = Rc<dyn GameSessions>;

/// Accessor for `scope`, or an inert one when no scope is mounted.
pub fn resolve(scope: Option<&SessionScope>) -> SessionAccessor {
    match scope {
        Some(scope) => scope.accessor(),
        None => {
            tracing::debug!("No session scope mounted, using inert accessor");
            Rc::new(InertSessions)
        }
    }
}

// ── Scope ─────────────────────────────────────────────────────────

/// Work waiting to be handed out after a store transition.
enum Pending {
    Event(SessionEvent),
    Complete(ClosedSession),
}

struct Shared {
    store: RefCell<SessionStore>,
    observers: RefCell<ObserverRegistry>,
    pending: RefCell<VecDeque<Pending>>,
    draining: Cell<bool>,
}

impl Shared {
    fn publish(&self, events: Vec<SessionEvent>) {
        self.pending
            .borrow_mut()
            .extend(events.into_iter().map(Pending::Event));
        self.drain();
    }

    /// Hand out queued events and completions in order.
    ///
    /// Only the outermost call drains. Anything an observer or callback
    /// triggers is queued behind the event currently being delivered, so
    /// every observer sees each event before the next one goes out.
    fn drain(&self) {
        if self.draining.replace(true) {
            return;
        }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(Pending::Event(event)) => {
                    let observers = self.observers.borrow().snapshot();
                    deliver(&observers, &event);
                }
                Some(Pending::Complete(closed)) => {
                    closed.complete();
                }
                None => break,
            }
        }
        self.draining.set(false);
    }

    fn end_game(&self) -> Option<CompletionStats> {
        let (closed, event) = self.store.borrow_mut().end_game()?;
        let stats = closed.stats();
        {
            let mut pending = self.pending.borrow_mut();
            pending.push_back(Pending::Event(event));
            pending.push_back(Pending::Complete(closed));
        }
        self.drain();
        Some(stats)
    }
}

/// Owner of the authoritative session store.
///
/// Not `Clone`: each scope is the single owner of its store, and every
/// accessor it hands out points back at that store only. Dropping the scope
/// ends any active session (firing its completion callback) and detaches
/// all outstanding accessors.
pub struct SessionScope {
    shared: Rc<Shared>,
}

impl SessionScope {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self::with_store(SessionStore::new(policy))
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_store(SessionStore::from_config(config))
    }

    pub fn with_store(store: SessionStore) -> Self {
        Self {
            shared: Rc::new(Shared {
                store: RefCell::new(store),
                observers: RefCell::new(ObserverRegistry::default()),
                pending: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }),
        }
    }

    pub fn accessor(&self) -> SessionAccessor {
        Rc::new(LiveSessions {
            shared: Rc::downgrade(&self.shared),
        })
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        if self.shared.store.borrow().is_active() {
            tracing::debug!("Session scope dropped with an active session, ending it");
            self.shared.end_game();
        }
    }
}

// ── Live accessor ─────────────────────────────────────────────────

struct LiveSessions {
    shared: Weak<Shared>,
}

impl GameSessions for LiveSessions {
    fn start_game_with(
        &self,
        kind: GameKind,
        options: &GameOptions,
        on_complete: Option<CompletionCallback>,
    ) -> Result<()> {
        let Some(shared) = self.shared.upgrade() else {
            return InertSessions.start_game_with(kind, options, on_complete);
        };
        let events = shared
            .store
            .borrow_mut()
            .start_game(kind, options, on_complete)?;
        shared.publish(events);
        Ok(())
    }

    fn end_game(&self) -> Option<CompletionStats> {
        self.shared.upgrade()?.end_game()
    }

    fn report(&self, outcome: RoundOutcome) {
        let Some(shared) = self.shared.upgrade() else {
            return InertSessions.report(outcome);
        };
        let event = shared.store.borrow_mut().report(outcome);
        if let Some(event) = event {
            shared.publish(vec![event]);
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        match self.shared.upgrade() {
            Some(shared) => shared.store.borrow().snapshot(),
            None => InertSessions.snapshot(),
        }
    }

    fn subscribe(&self, observer: SharedObserver) -> SubscriptionId {
        match self.shared.upgrade() {
            Some(shared) => shared.observers.borrow_mut().subscribe(observer),
            None => InertSessions.subscribe(observer),
        }
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.shared.upgrade() {
            Some(shared) => shared.observers.borrow_mut().unsubscribe(id),
            None => false,
        }
    }
}

// ── Inert accessor ────────────────────────────────────────────────

/// Stand-in used when no session scope is mounted.
///
/// Every mutation is a no-op, every counter reads zero, and no game is
/// ever active.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertSessions;

impl GameSessions for InertSessions {
    fn start_game_with(
        &self,
        kind: GameKind,
        _options: &GameOptions,
        _on_complete: Option<CompletionCallback>,
    ) -> Result<()> {
        tracing::debug!(kind = %kind, "start_game without a session scope ignored");
        Ok(())
    }

    fn end_game(&self) -> Option<CompletionStats> {
        None
    }

    fn report(&self, _outcome: RoundOutcome) {}

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::default()
    }

    fn subscribe(&self, _observer: SharedObserver) -> SubscriptionId {
        SubscriptionId::DETACHED
    }

    fn unsubscribe(&self, _id: SubscriptionId) -> bool {
        false
    }
}
