//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::config::{default_config_path, KeyholderConfig};
use crate::constants::env;

/// Resolve the config file path, checking KEYHOLDER_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path from the `--database` flag or the config.
pub fn resolve_database_path(
    flag: Option<&str>,
    config: Option<&KeyholderConfig>,
    config_path: &Path,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    match config {
        Some(config) => Ok(PathBuf::from(&config.database.path)),
        None => Err(anyhow::anyhow!(missing_config_message(config_path))),
    }
}

/// Error message when the database file is missing.
pub fn missing_database_message(path: &Path) -> String {
    format!(
        "No database found at {}\n\nRun:\n  keyholder init\n\nOr specify a database path:\n  KEYHOLDER_DATABASE=/path/to/keys.db keyholder init",
        path.display()
    )
}

/// Error message when the config file is missing.
fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No config found at {}\n\nRun:\n  keyholder init\n\nOr specify a database path:\n  keyholder --database /path/to/keys.db <command>",
        config_path.display()
    )
}
