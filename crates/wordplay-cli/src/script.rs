//! Scripted sessions: replay a JSON list of steps against a session scope.
//!
//! ```json
//! {
//!   "steps": [
//!     {"op": "start", "kind": "match", "options": {"rounds": 10}},
//!     {"op": "success"},
//!     {"op": "fail"},
//!     {"op": "close"}
//!   ]
//! }
//! ```
//!
//! A bare array of steps is accepted too. With `"detached": true` the steps
//! run against the inert accessor, as if no scope had been mounted.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use wordplay_core::{CompletionStats, GameKind, GameOptions, SessionEvent, WordplayConfig};
use wordplay_session::{
    observer_fn, resolve, GameSessions, GameShell, SessionScope, SessionSnapshot,
};

use crate::error::Result;

/// One scripted action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Start {
        kind: GameKind,
        #[serde(default)]
        options: GameOptions,
    },
    Success,
    Fail,
    /// `end_game` through the accessor.
    End,
    /// Close the game shell.
    Close,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub detached: bool,
    pub steps: Vec<Step>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptInput {
    Full(Script),
    Steps(Vec<Step>),
}

/// Parse a script from JSON (object form or bare step array).
pub fn parse_script(input: &str) -> Result<Script> {
    let script = match serde_json::from_str::<ScriptInput>(input)? {
        ScriptInput::Full(script) => script,
        ScriptInput::Steps(steps) => Script {
            detached: false,
            steps,
        },
    };
    Ok(script)
}

/// Everything observed while running a script.
#[derive(Debug, Serialize)]
pub struct ScriptReport {
    /// Statistics delivered to completion callbacks, in order.
    pub completions: Vec<CompletionStats>,
    /// Start requests refused under the reject policy.
    pub conflicts: Vec<String>,
    pub events: Vec<SessionEvent>,
    pub final_state: SessionSnapshot,
}

pub fn run_script(config: &WordplayConfig, script: &Script) -> ScriptReport {
    let scope = (!script.detached).then(|| SessionScope::from_config(&config.session));
    let sessions = resolve(scope.as_ref());
    let shell = GameShell::new(sessions.clone());

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    sessions.subscribe(observer_fn(move |event: &SessionEvent| {
        sink.borrow_mut().push(event.clone())
    }));

    let completions = Rc::new(RefCell::new(Vec::<CompletionStats>::new()));
    let mut conflicts = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = index, ?step, "Script step");
        match step {
            Step::Start { kind, options } => {
                let sink = completions.clone();
                let started = sessions.start_game_with(
                    kind.clone(),
                    options,
                    Some(Box::new(move |stats: CompletionStats| {
                        sink.borrow_mut().push(stats)
                    })),
                );
                if let Err(e) = started {
                    tracing::warn!(step = index, error = %e, "Start refused");
                    conflicts.push(e.to_string());
                }
            }
            Step::Success => sessions.report_success(),
            Step::Fail => sessions.report_fail(),
            Step::End => {
                sessions.end_game();
            }
            Step::Close => {
                shell.close();
            }
        }
    }

    let final_state = sessions.snapshot();
    let completions = completions.borrow().clone();
    let events = events.borrow().clone();

    ScriptReport {
        completions,
        conflicts,
        events,
        final_state,
    }
}
