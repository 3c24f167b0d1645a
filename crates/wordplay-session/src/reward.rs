//! Reward signal: transient success/failure acknowledgment.
//!
//! Purely decorative. The signal follows round reports as an observer and
//! never feeds back into the store. Time is passed in explicitly, so the
//! host's frame loop (or a test) decides when a pulse expires.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use wordplay_core::{EventPayload, RewardConfig, RoundCounters, RoundOutcome, SessionEvent};

use crate::observer::SessionObserver;

/// What is currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardPulse {
    pub correct: bool,
    pub message: Option<String>,
    pub shown_at: DateTime<Utc>,
}

/// Two states: hidden (`pulse == None`) or showing one pulse.
#[derive(Debug, Clone)]
pub struct RewardSignal {
    display: Duration,
    success_messages: Vec<String>,
    fail_messages: Vec<String>,
    pulse: Option<RewardPulse>,
}

impl RewardSignal {
    pub fn new(config: &RewardConfig) -> Self {
        Self {
            display: config.display_duration(),
            success_messages: config.success_messages.clone(),
            fail_messages: config.fail_messages.clone(),
            pulse: None,
        }
    }

    /// Show a pulse, replacing whatever is visible.
    pub fn show(&mut self, correct: bool, message: Option<String>, at: DateTime<Utc>) {
        self.pulse = Some(RewardPulse {
            correct,
            message,
            shown_at: at,
        });
    }

    /// Hide the pulse if its presentation time has run out.
    /// Returns whether a pulse is still showing.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if let Some(pulse) = &self.pulse {
            if now - pulse.shown_at >= self.display {
                self.pulse = None;
            }
        }
        self.pulse.is_some()
    }

    pub fn dismiss(&mut self) {
        self.pulse = None;
    }

    pub fn current(&self) -> Option<&RewardPulse> {
        self.pulse.as_ref()
    }

    pub fn is_showing(&self) -> bool {
        self.pulse.is_some()
    }

    fn message_for(&self, outcome: RoundOutcome, counters: &RoundCounters) -> Option<String> {
        let messages = if outcome.is_success() {
            &self.success_messages
        } else {
            &self.fail_messages
        };
        if messages.is_empty() {
            return None;
        }
        let index = counters.attempts.saturating_sub(1) as usize % messages.len();
        Some(messages[index].clone())
    }
}

impl Default for RewardSignal {
    fn default() -> Self {
        Self::new(&RewardConfig::default())
    }
}

impl SessionObserver for RewardSignal {
    fn on_event(&mut self, event: &SessionEvent) {
        if let EventPayload::RoundReported { outcome, counters } = &event.payload {
            let message = self.message_for(*outcome, counters);
            self.show(outcome.is_success(), message, event.timestamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordplay_core::{GameKind, SessionId};

    fn round(outcome: RoundOutcome, attempts: u32, at: DateTime<Utc>) -> SessionEvent {
        let mut event = SessionEvent::new(
            SessionId::new(),
            GameKind::new("match"),
            EventPayload::RoundReported {
                outcome,
                counters: RoundCounters {
                    attempts,
                    ..Default::default()
                },
            },
        );
        event.timestamp = at;
        event
    }

    fn signal(display_ms: u64) -> RewardSignal {
        RewardSignal::new(&RewardConfig {
            display_ms,
            success_messages: vec!["Yes!".into(), "Great!".into()],
            fail_messages: vec!["Oops".into()],
        })
    }

    #[test]
    fn round_report_shows_pulse() {
        let mut reward = signal(1000);
        let t0 = Utc::now();
        assert!(!reward.is_showing());

        reward.on_event(&round(RoundOutcome::Success, 1, t0));
        let pulse = reward.current().unwrap();
        assert!(pulse.correct);
        assert_eq!(pulse.message.as_deref(), Some("Yes!"));
    }

    #[test]
    fn pulse_hides_after_display_time() {
        let mut reward = signal(1000);
        let t0 = Utc::now();
        reward.on_event(&round(RoundOutcome::Failure, 1, t0));

        assert!(reward.poll(t0 + Duration::milliseconds(999)));
        assert!(!reward.poll(t0 + Duration::milliseconds(1000)));
        assert!(reward.current().is_none());
    }

    #[test]
    fn newer_report_replaces_pulse() {
        let mut reward = signal(1000);
        let t0 = Utc::now();
        reward.on_event(&round(RoundOutcome::Failure, 1, t0));
        reward.on_event(&round(
            RoundOutcome::Success,
            2,
            t0 + Duration::milliseconds(800),
        ));

        let pulse = reward.current().unwrap();
        assert!(pulse.correct);
        assert_eq!(pulse.message.as_deref(), Some("Great!"));
        // The timer restarts from the replacing pulse.
        assert!(reward.poll(t0 + Duration::milliseconds(1500)));
        assert!(!reward.poll(t0 + Duration::milliseconds(1800)));
    }

    #[test]
    fn non_round_events_leave_signal_alone() {
        let mut reward = signal(1000);
        let event = SessionEvent::new(
            SessionId::new(),
            GameKind::new("match"),
            EventPayload::GameCompleted {
                stats: Default::default(),
            },
        );
        reward.on_event(&event);
        assert!(!reward.is_showing());
    }

    #[test]
    fn empty_message_list_shows_without_text() {
        let mut reward = RewardSignal::new(&RewardConfig {
            display_ms: 500,
            success_messages: vec![],
            fail_messages: vec![],
        });
        reward.on_event(&round(RoundOutcome::Success, 1, Utc::now()));
        assert_eq!(reward.current().unwrap().message, None);

        reward.dismiss();
        assert!(!reward.is_showing());
    }
}
