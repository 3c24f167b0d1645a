//! Game shell: the container hosting whichever mini-game is active.

use wordplay_core::{CompletionStats, GameKind};

use crate::accessor::SessionAccessor;

/// Visibility follows the session: the shell is open exactly while a game
/// is active, and closing it always ends that game first.
pub struct GameShell {
    sessions: SessionAccessor,
}

impl GameShell {
    pub fn new(sessions: SessionAccessor) -> Self {
        Self { sessions }
    }

    pub fn is_open(&self) -> bool {
        self.sessions.is_active()
    }

    /// The game being hosted, for the container's title.
    pub fn hosted_game(&self) -> Option<GameKind> {
        self.sessions.active_game()
    }

    /// End the hosted session, then hide. Safe to call when already closed.
    pub fn close(&self) -> Option<CompletionStats> {
        let stats = self.sessions.end_game();
        if let Some(stats) = &stats {
            tracing::debug!(
                correct = stats.correct,
                total_rounds = stats.total_rounds,
                "Game shell closed"
            );
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{resolve, SessionScope};
    use wordplay_core::{ConflictPolicy, GameOptions};

    #[test]
    fn open_while_game_active() {
        let scope = SessionScope::new(ConflictPolicy::Supersede);
        let sessions = scope.accessor();
        let shell = GameShell::new(sessions.clone());
        assert!(!shell.is_open());

        sessions
            .start_game("match".into(), &GameOptions::new())
            .unwrap();
        assert!(shell.is_open());
        assert_eq!(shell.hosted_game(), Some(GameKind::new("match")));
    }

    #[test]
    fn close_ends_session() {
        let scope = SessionScope::new(ConflictPolicy::Reject);
        let sessions = scope.accessor();
        let shell = GameShell::new(sessions.clone());

        sessions
            .start_game("match".into(), &GameOptions::new())
            .unwrap();
        sessions.report_success();

        let stats = shell.close().unwrap();
        assert_eq!(stats.correct, 1);
        assert!(!shell.is_open());
        assert!(shell.close().is_none());

        // No orphaned session blocks the next start under the reject policy.
        assert!(sessions
            .start_game("spell".into(), &GameOptions::new())
            .is_ok());
    }

    #[test]
    fn detached_shell_stays_closed() {
        let shell = GameShell::new(resolve(None));
        assert!(!shell.is_open());
        assert!(shell.hosted_game().is_none());
        assert!(shell.close().is_none());
    }
}
