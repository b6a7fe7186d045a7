//! Error types for Keyholder core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! exit codes and user-facing messages. No variant ever carries plaintext,
//! passphrases or key material.

use thiserror::Error;

/// Result type alias for Keyholder operations.
pub type Result<T> = std::result::Result<T, KeyholderError>;

/// Input that failed a boundary length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Label,
    Passphrase,
    Secret,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Label => "label",
            Field::Passphrase => "passphrase",
            Field::Secret => "secret",
        };
        f.write_str(name)
    }
}

/// Boundary validation failures, returned as values rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input length (in characters) outside the allowed range.
    #[error("{field} must be between {min} and {max} characters long (got {actual})")]
    Length {
        field: Field,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// A required field was not supplied.
    #[error("missing field: {0}")]
    Missing(Field),

    /// Fields that only make sense together were supplied partially.
    #[error("{0} and {1} must be provided together")]
    Incomplete(Field, Field),

    /// Sealed blob size outside what the store accepts.
    #[error("sealed value must be between {min} and {max} bytes (got {actual})")]
    BlobSize { min: usize, max: usize, actual: usize },

    /// Other validation failure.
    #[error("{0}")]
    Other(String),
}

/// Core error type for Keyholder operations.
#[derive(Debug, Error)]
pub enum KeyholderError {
    /// Wrong passphrase or corrupted/tampered blob. The two cases are
    /// deliberately indistinguishable.
    #[error("Invalid passphrase or corrupted data")]
    Authentication,

    /// Blob too short to carry its header, or of an unknown format version.
    #[error("Malformed sealed value: {0}")]
    MalformedBlob(String),

    /// Cryptographic failure unrelated to authentication (e.g. no OS RNG).
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint would be violated
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Password hashing or verification failure
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl From<std::io::Error> for KeyholderError {
    fn from(err: std::io::Error) -> Self {
        KeyholderError::Storage(err.to_string())
    }
}

impl KeyholderError {
    /// True for the failure a caller should answer by asking for the
    /// passphrase again.
    pub fn is_authentication(&self) -> bool {
        matches!(self, KeyholderError::Authentication)
    }
}
