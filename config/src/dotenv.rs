//! Project `.env` file, read with the `dotenv` crate without touching the environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `.env` in `override_dir`, else in the current directory, if it exists.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Key-value pairs of the `.env` file; a missing file yields an empty map.
///
/// Later assignments of the same key win.
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let iter = ::dotenv::from_path_iter(&path)?;
    let mut out = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        out.insert(key, value);
    }
    Ok(out)
}
