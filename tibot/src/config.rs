//! Orchestration settings read from the environment.
//!
//! | variable                         | field                | default |
//! |----------------------------------|----------------------|---------|
//! | `TIBOT_MAX_ITERATIONS`           | `max_iterations`     | 1       |
//! | `TIBOT_RECURSION_LIMIT`          | `recursion_limit`    | 25      |
//! | `TIBOT_CAPABILITY_TIMEOUT_SECS`  | `capability_timeout` | none    |
//!
//! [`OrchestrationConfig::from_env`] first loads `.env` and the XDG `config.toml` through
//! the `config` crate, so values can live in either place.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::graph::DEFAULT_RECURSION_LIMIT;

pub const ENV_MAX_ITERATIONS: &str = "TIBOT_MAX_ITERATIONS";
pub const ENV_RECURSION_LIMIT: &str = "TIBOT_RECURSION_LIMIT";
pub const ENV_CAPABILITY_TIMEOUT_SECS: &str = "TIBOT_CAPABILITY_TIMEOUT_SECS";

/// App name for the XDG config directory.
pub const APP_NAME: &str = "tibot";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("load config: {0}")]
    Load(#[from] env_config::LoadError),
    #[error("invalid {key}={value}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Limits applied to every workflow built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestrationConfig {
    /// Judge runs per turn before the loop is forced to end.
    pub max_iterations: usize,
    /// Node executions per run before `AgentError::RecursionLimit`.
    pub recursion_limit: usize,
    /// Wall-clock bound per capability call.
    pub capability_timeout: Option<Duration>,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            capability_timeout: None,
        }
    }
}

fn parse_positive<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let parsed = raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    if parsed == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}

impl OrchestrationConfig {
    /// Loads `.env` / XDG config into the environment, then reads the `TIBOT_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let applied = env_config::load_and_apply(APP_NAME, None)?;
        if !applied.is_empty() {
            tracing::debug!(keys = ?applied, "applied config from .env / config.toml");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_ITERATIONS) {
            config.max_iterations = parse_positive(ENV_MAX_ITERATIONS, raw)?;
        }
        if let Some(raw) = lookup(ENV_RECURSION_LIMIT) {
            config.recursion_limit = parse_positive(ENV_RECURSION_LIMIT, raw)?;
        }
        if let Some(raw) = lookup(ENV_CAPABILITY_TIMEOUT_SECS) {
            let secs: u64 = parse_positive(ENV_CAPABILITY_TIMEOUT_SECS, raw)?;
            config.capability_timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    pub fn with_capability_timeout(mut self, timeout: Duration) -> Self {
        self.capability_timeout = Some(timeout);
        self
    }
}
