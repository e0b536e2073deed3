//! Load configuration from the XDG `config.toml` and a project `.env`, then apply it to the
//! process environment with priority: **existing env > .env > XDG**.
//!
//! ```toml
//! # ~/.config/tibot/config.toml
//! [env]
//! TIBOT_MAX_ITERATIONS = 3
//! TIBOT_CAPABILITY_TIMEOUT_SECS = 60
//! ```

mod dotenv;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("xdg config [env].{key}: expected a scalar, found {kind}")]
    XdgValue { key: String, kind: &'static str },
    #[error("read .env: {0}")]
    Dotenv(#[from] ::dotenv::Error),
}

/// Values from `.env` and XDG merged by precedence (.env over XDG), without looking at
/// the current environment.
pub fn load_layers(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<HashMap<String, String>, LoadError> {
    let mut merged = xdg_toml::load_env_map(app_name)?;
    merged.extend(dotenv::load_env_map(override_dir)?);
    Ok(merged)
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set.
///
/// * `app_name`: e.g. `"tibot"`; the XDG file is `<config dir>/<app_name>/config.toml`.
/// * `override_dir`: if `Some`, look for `.env` there instead of the current directory.
///
/// Returns the keys that were set.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let mut applied = Vec::new();
    for (key, value) in load_layers(app_name, override_dir)? {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        std::env::set_var(&key, value);
        applied.push(key);
    }
    applied.sort();
    Ok(applied)
}

/// Serializes tests that mutate `XDG_CONFIG_HOME`.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
