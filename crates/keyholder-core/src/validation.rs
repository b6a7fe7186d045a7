//! Boundary validation for labels, passphrases and secrets.
//!
//! The crypto core trusts its caller; these checks run before anything is
//! sealed or stored. Lengths are counted in characters, not bytes.

use crate::error::{Field, Result, ValidationError};

/// Maximum label length in characters.
pub const MAX_LABEL_CHARS: usize = 128;

/// Maximum passphrase length in characters.
pub const MAX_PASSPHRASE_CHARS: usize = 128;

/// Maximum secret length in characters.
pub const MAX_SECRET_CHARS: usize = 4096;

fn check_length(field: Field, value: &str, max: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual < 1 || actual > max {
        return Err(ValidationError::Length {
            field,
            min: 1,
            max,
            actual,
        }
        .into());
    }
    Ok(())
}

/// Validate a record label (1–128 characters).
///
/// # Examples
///
/// ```
/// use keyholder_core::validation::validate_label;
///
/// assert!(validate_label("github-token").is_ok());
/// assert!(validate_label("").is_err());
/// ```
pub fn validate_label(label: &str) -> Result<()> {
    check_length(Field::Label, label, MAX_LABEL_CHARS)
}

/// Validate a passphrase (1–128 characters).
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    check_length(Field::Passphrase, passphrase, MAX_PASSPHRASE_CHARS)
}

/// Validate a plaintext secret (1–4096 characters).
pub fn validate_secret(secret: &str) -> Result<()> {
    check_length(Field::Secret, secret, MAX_SECRET_CHARS)
}
