//! wordplay-session: Mini-game session orchestration.
//!
//! Tracks which mini-game is active, records per-round outcomes, and hands
//! completion statistics back to the surface that launched the game:
//!
//! ```
//! # use std::cell::Cell;
//! # use std::rc::Rc;
//! use wordplay_core::{CompletionStats, ConflictPolicy, GameOptions};
//! use wordplay_session::{GameSessions, SessionScope};
//!
//! let scope = SessionScope::new(ConflictPolicy::Supersede);
//! let sessions = scope.accessor();
//!
//! let finished = Rc::new(Cell::new(None::<CompletionStats>));
//! let sink = finished.clone();
//! sessions
//!     .start_game_with(
//!         "match".into(),
//!         &GameOptions::new().with("rounds", 3),
//!         Some(Box::new(move |stats| sink.set(Some(stats)))),
//!     )
//!     .unwrap();
//! sessions.report_success();
//! sessions.report_fail();
//! sessions.report_success();
//! sessions.end_game();
//!
//! let stats = finished.get().unwrap();
//! assert_eq!((stats.correct, stats.total_rounds, stats.best_streak), (2, 3, 1));
//! ```
//!
//! When no scope is mounted, [`resolve`] hands out an inert accessor with the
//! same interface, so callers never need to check for one.

pub mod accessor;
pub mod aggregate;
pub mod error;
pub mod observer;
pub mod reward;
pub mod shell;
pub mod store;

pub use accessor::{resolve, GameSessions, InertSessions, SessionAccessor, SessionScope};
pub use error::SessionError;
pub use observer::{observer_fn, SessionObserver, SharedObserver, SubscriptionId};
pub use reward::{RewardPulse, RewardSignal};
pub use shell::GameShell;
pub use store::{ClosedSession, CompletionCallback, GameSession, SessionSnapshot, SessionStore};
