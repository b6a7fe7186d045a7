//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (key, admin user).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase or password).
    pub const AUTH_FAILED: i32 = 5;

    /// Stored data failed an integrity check.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// Label or user already exists.
    pub const ALREADY_EXISTS: i32 = 7;
}

/// Environment variables read by the CLI.
pub mod env {
    pub const CONFIG: &str = "KEYHOLDER_CONFIG";
    pub const DATABASE: &str = "KEYHOLDER_DATABASE";
    pub const PASSPHRASE: &str = "KEYHOLDER_PASSPHRASE";
    pub const ADMIN_PASSWORD: &str = "KEYHOLDER_ADMIN_PASSWORD";
    pub const LOG: &str = "KEYHOLDER_LOG";
}

/// Log level used when neither `KEYHOLDER_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
