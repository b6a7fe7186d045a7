//! Sealed blob layout.
//!
//! ```text
//! +---------+-----------+------------+---------------------+----------+
//! | version | salt (16) | nonce (12) | ciphertext (n)      | tag (16) |
//! +---------+-----------+------------+---------------------+----------+
//! ```
//!
//! The version byte selects the derivation work factor and the cipher, so
//! either can change without breaking blobs written earlier. It is also fed
//! to the cipher as associated data.

use crate::error::{KeyholderError, Result};
use crate::validation::MAX_SECRET_CHARS;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes (96-bit).
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 work factor for [`FormatVersion::V1`].
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// Version byte plus salt: the part that must be present to parse a blob.
pub const HEADER_LEN: usize = 1 + SALT_LEN;

/// Smallest blob that can hold a sealed non-empty secret.
pub const MIN_SEALED_LEN: usize = sealed_len(1);

/// Largest blob a maximum-length secret of 4-byte characters seals into.
pub const MAX_SEALED_LEN: usize = sealed_len(MAX_SECRET_CHARS * 4);

/// Size of the blob produced for a plaintext of `plaintext_len` bytes.
pub const fn sealed_len(plaintext_len: usize) -> usize {
    HEADER_LEN + NONCE_LEN + plaintext_len + TAG_LEN
}

/// Blob format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FormatVersion {
    /// PBKDF2-HMAC-SHA256, 200,000 iterations; AES-256-GCM.
    V1 = 1,
}

impl FormatVersion {
    /// Version written by [`crate::crypto::seal`].
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(FormatVersion::V1),
            _ => None,
        }
    }

    /// PBKDF2 work factor implied by this version.
    pub fn pbkdf2_iterations(self) -> u32 {
        match self {
            FormatVersion::V1 => PBKDF2_ITERATIONS,
        }
    }
}

/// Borrowed view over a sealed blob.
#[derive(Debug)]
pub struct SealedBlob<'a> {
    pub version: FormatVersion,
    pub salt: &'a [u8; SALT_LEN],
    body: &'a [u8],
}

impl<'a> SealedBlob<'a> {
    /// Split a blob into header and body.
    ///
    /// # Errors
    ///
    /// Returns `KeyholderError::MalformedBlob` if the blob is shorter than
    /// the header or carries an unknown version byte. Anything past the
    /// header is left for the cipher to judge.
    pub fn parse(blob: &'a [u8]) -> Result<Self> {
        if blob.len() < HEADER_LEN {
            return Err(KeyholderError::MalformedBlob(format!(
                "expected at least {} bytes, got {}",
                HEADER_LEN,
                blob.len()
            )));
        }

        let version = FormatVersion::from_tag(blob[0]).ok_or_else(|| {
            KeyholderError::MalformedBlob(format!("unsupported format version {}", blob[0]))
        })?;
        let salt: &[u8; SALT_LEN] = blob[1..HEADER_LEN]
            .try_into()
            .map_err(|_| KeyholderError::MalformedBlob("salt slice".to_string()))?;

        Ok(Self {
            version,
            salt,
            body: &blob[HEADER_LEN..],
        })
    }

    /// Nonce and ciphertext (tag included), or `None` if the body is too
    /// short to hold a nonce.
    pub fn nonce_and_ciphertext(&self) -> Option<(&'a [u8], &'a [u8])> {
        if self.body.len() < NONCE_LEN {
            return None;
        }
        Some(self.body.split_at(NONCE_LEN))
    }
}
