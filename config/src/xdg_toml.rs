//! `[env]` table of `<config dir>/<app>/config.toml`.
//!
//! The config dir is `$XDG_CONFIG_HOME` when set and non-empty, otherwise the platform
//! default from `dirs::config_dir()`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::LoadError;

/// Base config directory; `None` when neither source yields one.
pub(crate) fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn config_path(app_name: &str) -> Option<PathBuf> {
    let path = config_home()?.join(app_name).join("config.toml");
    path.is_file().then_some(path)
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, toml::Value>,
}

/// Scalars become their plain text; tables and arrays are rejected.
fn env_value(key: &str, value: toml::Value) -> Result<String, LoadError> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(LoadError::XdgValue {
            key: key.to_string(),
            kind: other.type_str(),
        }),
    }
}

/// Env pairs from the `[env]` section. Missing file or section yields an empty map.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = config_path(app_name) else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    config
        .env
        .into_iter()
        .map(|(k, v)| env_value(&k, v).map(|v| (k, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Runs `f` with `XDG_CONFIG_HOME` pointed at `dir`, restoring the previous value.
    fn with_xdg<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let prev = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", dir);
        let out = f();
        match prev {
            Some(p) => env::set_var("XDG_CONFIG_HOME", p),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        out
    }

    fn write_config(dir: &std::path::Path, app: &str, body: &str) {
        let app_dir = dir.join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn missing_config_returns_empty_map() {
        let map = load_env_map("tibot-config-test-nonexistent-12345").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn reads_scalars_as_text() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "tibot-scalars",
            "[env]\nTIBOT_MAX_ITERATIONS = 3\nMODEL = \"gpt\"\nVERBOSE = true\n",
        );
        let map = with_xdg(dir.path(), || load_env_map("tibot-scalars")).unwrap();
        assert_eq!(map.get("TIBOT_MAX_ITERATIONS").map(String::as_str), Some("3"));
        assert_eq!(map.get("MODEL").map(String::as_str), Some("gpt"));
        assert_eq!(map.get("VERBOSE").map(String::as_str), Some("true"));
    }

    #[test]
    fn table_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "tibot-nested", "[env.NESTED]\nx = 1\n");
        let result = with_xdg(dir.path(), || load_env_map("tibot-nested"));
        assert!(matches!(result, Err(LoadError::XdgValue { ref key, .. }) if key == "NESTED"));
    }

    #[test]
    fn config_without_env_section_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "tibot-noenv", "[other]\nkey = \"ignored\"\n");
        let map = with_xdg(dir.path(), || load_env_map("tibot-noenv")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "tibot-bad", "not valid toml [[[\n");
        let result = with_xdg(dir.path(), || load_env_map("tibot-bad"));
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
