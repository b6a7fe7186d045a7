//! Tracing setup.
//!
//! Logs go to stderr so stdout stays scriptable. The filter comes from
//! `KEYHOLDER_LOG`, then the config file, then the default level.

use tracing_subscriber::EnvFilter;

use crate::constants::{env, DEFAULT_LOG_LEVEL};

/// Build the filter for `configured` (the config file's level).
pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(env::LOG)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
