//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module turns a passphrase plus a per-blob random salt into a
//! 256-bit key. The work factor is fixed per format version and never
//! stored alongside the blob.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use super::format::{FormatVersion, KEY_LEN, SALT_LEN};
use crate::error::{KeyholderError, Result};

/// A cryptographic key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase with the current work factor.
///
/// # Arguments
///
/// * `passphrase` - The passphrase to derive from
/// * `salt` - Random salt, unique per sealed blob
///
/// # Security
///
/// - Same passphrase + salt always produces same key (deterministic)
/// - Runs the full iteration count for every input, empty passphrase included
/// - Rejecting weak passphrases is the caller's job, not this function's
///
/// # Examples
///
/// ```
/// use keyholder_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let key = derive_key("my-passphrase", &salt);
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    derive_key_for(FormatVersion::CURRENT, passphrase, salt)
}

/// Derive a key with the work factor of a specific format version.
pub(crate) fn derive_key_for(
    version: FormatVersion,
    passphrase: &str,
    salt: &[u8; SALT_LEN],
) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        salt,
        version.pbkdf2_iterations(),
        &mut key_bytes,
    );
    DerivedKey::from_bytes(key_bytes)
}

/// Generate a fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt)?;
    Ok(salt)
}

pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)
        .map_err(|e| KeyholderError::Crypto(format!("OS random source unavailable: {}", e)))
}
