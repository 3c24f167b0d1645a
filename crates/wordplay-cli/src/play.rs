//! One-shot session play: start, report a fixed outcome sequence, close.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use wordplay_core::{
    CompletionStats, ConflictPolicy, GameKind, GameOptions, RoundOutcome, WordplayConfig,
};
use wordplay_session::{GameSessions, GameShell, RewardSignal, SessionScope};

use crate::error::{CliError, Result};

/// Result of `wordplay run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub kind: GameKind,
    pub stats: CompletionStats,
    pub accuracy: f64,
    /// Reward message shown for each round, in order.
    pub rewards: Vec<Option<String>>,
}

/// Parse a round string such as `"+++-++"`. Whitespace is ignored.
pub fn parse_outcomes(raw: &str) -> Result<Vec<RoundOutcome>> {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '+' => Ok(RoundOutcome::Success),
            '-' => Ok(RoundOutcome::Failure),
            other => Err(CliError::InvalidOutcome(other)),
        })
        .collect()
}

pub fn parse_policy(s: &str) -> Result<ConflictPolicy> {
    match s.to_lowercase().as_str() {
        "supersede" => Ok(ConflictPolicy::Supersede),
        "reject" => Ok(ConflictPolicy::Reject),
        _ => Err(CliError::InvalidPolicy(s.to_string())),
    }
}

/// Build an options bag from `key=value` pairs.
pub fn parse_options(pairs: &[String]) -> Result<GameOptions> {
    let mut options = GameOptions::new();
    for pair in pairs {
        options.insert_pair(pair)?;
    }
    Ok(options)
}

/// Play a single session to completion through the game shell.
pub fn play_once(
    config: &WordplayConfig,
    kind: GameKind,
    options: &GameOptions,
    outcomes: &[RoundOutcome],
) -> Result<RunReport> {
    let scope = SessionScope::from_config(&config.session);
    let sessions = scope.accessor();
    let shell = GameShell::new(sessions.clone());
    let reward = Rc::new(RefCell::new(RewardSignal::new(&config.reward)));
    sessions.subscribe(reward.clone());

    sessions.start_game(kind.clone(), options)?;

    let mut rewards = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        sessions.report(*outcome);
        rewards.push(reward.borrow().current().and_then(|p| p.message.clone()));
    }

    // The session was started above, so the shell always has one to close.
    let stats = shell.close().unwrap_or_default();

    tracing::info!(
        kind = %kind,
        correct = stats.correct,
        total_rounds = stats.total_rounds,
        best_streak = stats.best_streak,
        "Run complete"
    );

    Ok(RunReport {
        kind,
        stats,
        accuracy: stats.accuracy(),
        rewards,
    })
}
