//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Core errors travel
//! through `anyhow` untouched and are classified here, in one place.

use std::fmt;

use keyholder_core::KeyholderError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Authentication failed (wrong admin password)
    AuthFailed(String),

    /// Invalid user input
    InvalidInput(String),

    /// Database failed its integrity check
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::AuthFailed(message)
            | CliError::InvalidInput(message)
            | CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create an AuthFailed error.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed(message.into())
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::AuthFailed(_) => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

fn core_exit_code(err: &KeyholderError) -> i32 {
    match err {
        KeyholderError::NotFound(_) => exit_codes::NOT_FOUND,
        KeyholderError::Validation(_) => exit_codes::INVALID_INPUT,
        KeyholderError::Authentication => exit_codes::AUTH_FAILED,
        KeyholderError::MalformedBlob(_) => exit_codes::INTEGRITY_FAILED,
        KeyholderError::AlreadyExists(_) => exit_codes::ALREADY_EXISTS,
        _ => exit_codes::GENERAL,
    }
}

/// Resolve the process exit code for an error returned by a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    err.downcast_ref::<KeyholderError>()
        .map(core_exit_code)
        .unwrap_or(exit_codes::GENERAL)
}

/// Contextual hint for common core errors.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<KeyholderError>()? {
        KeyholderError::Authentication => {
            Some("Hint: Use the passphrase the key was stored with. Set KEYHOLDER_PASSPHRASE to skip the prompt.")
        }
        KeyholderError::NotFound(what) if what.starts_with("user") => {
            Some("Hint: Run `keyholder admin init` to create the admin user.")
        }
        KeyholderError::NotFound(_) => Some("Hint: Run `keyholder list` to see stored labels."),
        KeyholderError::AlreadyExists(_) => {
            Some("Hint: Use `keyholder update` to change an existing key.")
        }
        KeyholderError::MalformedBlob(_) => Some("Hint: Run `keyholder check` to scan the database."),
        _ => None,
    }
}
