//! Round outcome aggregation.
//!
//! Pure functions: counters in, counters or completion statistics out.
//! The session store routes every round report through [`advance`], so the
//! arithmetic lives in exactly one place.

use wordplay_core::{CompletionStats, RoundCounters, RoundOutcome};

/// Apply one round outcome to a set of counters.
pub fn advance(counters: RoundCounters, outcome: RoundOutcome) -> RoundCounters {
    let mut next = counters;
    next.attempts = next.attempts.saturating_add(1);

    match outcome {
        RoundOutcome::Success => {
            next.score = next.score.saturating_add(1);
            next.current_streak = next.current_streak.saturating_add(1);
            next.best_streak = next.best_streak.max(next.current_streak);
        }
        RoundOutcome::Failure => {
            next.current_streak = 0;
        }
    }

    next
}

/// Fold a sequence of outcomes into counters, starting from zero.
pub fn fold_outcomes<I>(outcomes: I) -> RoundCounters
where
    I: IntoIterator<Item = RoundOutcome>,
{
    outcomes
        .into_iter()
        .fold(RoundCounters::default(), advance)
}

/// Final statistics for a session that ended with these counters.
pub fn completion_stats(counters: &RoundCounters) -> CompletionStats {
    CompletionStats {
        correct: counters.score,
        total_rounds: counters.attempts,
        best_streak: counters.best_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RoundOutcome::{Failure as F, Success as S};

    #[test]
    fn success_increments_everything() {
        let c = advance(RoundCounters::default(), S);
        assert_eq!(c.score, 1);
        assert_eq!(c.attempts, 1);
        assert_eq!(c.current_streak, 1);
        assert_eq!(c.best_streak, 1);
    }

    #[test]
    fn failure_resets_streak_but_keeps_best() {
        let c = fold_outcomes([S, S, F]);
        assert_eq!(c.score, 2);
        assert_eq!(c.attempts, 3);
        assert_eq!(c.current_streak, 0);
        assert_eq!(c.best_streak, 2);
    }

    #[test]
    fn best_streak_is_longest_run() {
        assert_eq!(fold_outcomes([S, S, F, S]).best_streak, 2);
        assert_eq!(fold_outcomes([F, S, F, S, S, S, F]).best_streak, 3);
        assert_eq!(fold_outcomes([F, F, F]).best_streak, 0);
    }

    #[test]
    fn counters_invariants_hold() {
        let sequence = [S, F, S, S, F, F, S, S, S, S, F];
        let mut c = RoundCounters::default();
        for outcome in sequence {
            c = advance(c, outcome);
            assert!(c.attempts >= c.score);
            assert!(c.best_streak >= c.current_streak);
            assert!(c.best_streak <= c.attempts);
        }
        assert_eq!(c.attempts, sequence.len() as u32);
        let successes = sequence.iter().filter(|o| o.is_success()).count() as u32;
        assert_eq!(c.score, successes);
        assert_eq!(c.score, 7);
    }

    #[test]
    fn completion_stats_from_hand_built_counters() {
        let counters = RoundCounters {
            score: 5,
            attempts: 6,
            current_streak: 2,
            best_streak: 3,
        };
        assert_eq!(
            completion_stats(&counters),
            CompletionStats {
                correct: 5,
                total_rounds: 6,
                best_streak: 3,
            }
        );
    }

    #[test]
    fn empty_sequence_is_zero() {
        assert_eq!(
            fold_outcomes(Vec::<RoundOutcome>::new()),
            RoundCounters::default()
        );
        assert_eq!(
            completion_stats(&RoundCounters::default()),
            CompletionStats::default()
        );
    }
}
