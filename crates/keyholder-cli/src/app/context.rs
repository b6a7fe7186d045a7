//! Application context for the Keyholder CLI.
//!
//! Combines CLI arguments with a lazily-loaded config file.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use keyholder_core::SqliteStore;

use crate::cli::Cli;
use crate::config::{read_config, KeyholderConfig};
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::ui::UiContext;

use super::resolver::{missing_database_message, resolve_config_path, resolve_database_path};

/// Application context that bundles CLI args with configuration.
///
/// The config file is read at most once per process, on first use.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config_path: OnceCell<PathBuf>,
    config: OnceCell<Option<KeyholderConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config_path: OnceCell::new(),
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// `--database` flag or `KEYHOLDER_DATABASE`.
    pub fn database_flag(&self) -> Option<&str> {
        self.cli.database.as_deref()
    }

    /// Resolved config file path.
    pub fn config_path(&self) -> anyhow::Result<&Path> {
        self.config_path
            .get_or_try_init(resolve_config_path)
            .map(PathBuf::as_path)
    }

    /// The config file, or `None` if it does not exist yet.
    pub fn config(&self) -> anyhow::Result<Option<&KeyholderConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = self.config_path()?;
            if path.exists() {
                read_config(path).map(Some)
            } else {
                Ok(None)
            }
        })?;
        Ok(config.as_ref())
    }

    /// Log filter from the config file, falling back to the default.
    ///
    /// A config that fails to load is reported later by the command that
    /// needs it.
    pub fn log_level(&self) -> String {
        match self.config() {
            Ok(Some(config)) => config.logging.level.clone(),
            _ => DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Resolved database path.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        let config_path = self.config_path()?;
        resolve_database_path(self.database_flag(), self.config()?, config_path)
    }

    /// Open the existing database.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.database_path()?;
        if !path.exists() {
            return Err(anyhow::anyhow!(missing_database_message(&path)));
        }
        Ok(SqliteStore::open(&path)?)
    }

    /// UI context for a command.
    pub fn ui(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.cli.quiet)
    }
}
