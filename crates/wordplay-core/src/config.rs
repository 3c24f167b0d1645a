//! Configuration management for Wordplay.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (WORDPLAY__ prefix, `__` separator)
//! 2. Config file (wordplay.toml)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "WORDPLAY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordplayConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub reward: RewardConfig,
}

impl WordplayConfig {
    /// Load from `{file_prefix}.toml` (optional) and `WORDPLAY__` variables,
    /// e.g. `WORDPLAY__SESSION__CONFLICT_POLICY=reject`.
    ///
    /// A file that cannot be read or parsed is an error. If any value has the
    /// wrong shape the warning is logged and the whole configuration falls
    /// back to defaults, valid sections included.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with_env_prefix(file_prefix, ENV_PREFIX)
    }

    /// Same as [`WordplayConfig::load`], reading `{env_prefix}__` variables.
    pub fn load_with_env_prefix(file_prefix: &str, env_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match cfg.try_deserialize::<WordplayConfig>() {
            Ok(c) => Ok(c),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid configuration, using defaults");
                Ok(WordplayConfig::default())
            }
        }
    }
}

/// What `start_game` does while another session is still active.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Abandon the running session without firing its completion callback.
    #[default]
    Supersede,
    /// Refuse the new session with a conflict error.
    Reject,
}

/// Session store settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

/// Reward signal settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardConfig {
    /// How long a pulse stays visible, in milliseconds.
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    #[serde(default = "default_success_messages")]
    pub success_messages: Vec<String>,

    #[serde(default = "default_fail_messages")]
    pub fail_messages: Vec<String>,
}

impl RewardConfig {
    pub fn display_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.display_ms).unwrap_or(i64::MAX))
    }
}

fn default_display_ms() -> u64 {
    1500
}

fn default_success_messages() -> Vec<String> {
    ["Great job!", "You got it!", "Super!"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_fail_messages() -> Vec<String> {
    ["Try again!", "Almost!"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            success_messages: default_success_messages(),
            fail_messages: default_fail_messages(),
        }
    }
}
