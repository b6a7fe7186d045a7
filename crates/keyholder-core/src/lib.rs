//! # Keyholder Core
//!
//! Core library for Keyholder, a minimal secret store: every secret is
//! sealed under a key derived from its own passphrase, and only the sealed
//! blob is ever persisted.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation and the sealed envelope
//! - **validation**: input length checks at the boundary
//! - **storage**: store traits and the SQLite backend
//! - **keys**: the service tying the three together
//! - **admin**: idempotent admin provisioning

pub mod admin;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod storage;
pub mod validation;

pub use error::{KeyholderError, Result, ValidationError};
pub use keys::{KeyService, KeyUpdate};
pub use storage::{KeyStore, SqliteStore, UserStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
