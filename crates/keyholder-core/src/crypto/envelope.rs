//! Passphrase envelope: seal and open secrets with AES-256-GCM.
//!
//! Every call to [`seal`] draws a fresh salt and a fresh nonce, derives a
//! key from the passphrase and that salt, and returns a self-contained
//! blob (see [`super::format`]). [`open`] re-derives the key from the salt
//! embedded in the blob; nothing is cached between calls.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use secrecy::SecretString;
use tracing::debug;

use super::format::{sealed_len, FormatVersion, SealedBlob, NONCE_LEN};
use super::key::{derive_key_for, fill_random, generate_salt};
use crate::error::{KeyholderError, Result};

/// Seal a plaintext secret under a passphrase.
///
/// # Returns
///
/// The complete blob, `version || salt || nonce || ciphertext || tag`.
/// Either the whole blob is produced or an error is returned.
///
/// # Errors
///
/// Returns `KeyholderError::Crypto` if the OS random source fails.
///
/// # Examples
///
/// ```
/// use keyholder_core::crypto::{open, seal};
/// use secrecy::ExposeSecret;
///
/// let blob = seal("super-secret", "pwd123").unwrap();
/// assert!(blob.len() >= 33);
/// assert_eq!(open(&blob, "pwd123").unwrap().expose_secret(), "super-secret");
/// assert!(open(&blob, "wrong").is_err());
/// ```
pub fn seal(plaintext: &str, passphrase: &str) -> Result<Vec<u8>> {
    seal_with_version(FormatVersion::CURRENT, plaintext, passphrase)
}

fn seal_with_version(version: FormatVersion, plaintext: &str, passphrase: &str) -> Result<Vec<u8>> {
    let salt = generate_salt()?;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    fill_random(&mut nonce_bytes)?;

    let key = derive_key_for(version, passphrase, &salt);
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let aad = [version.tag()];
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext.as_bytes(),
                aad: &aad,
            },
        )
        .map_err(|_| KeyholderError::Crypto("AES-GCM encryption failed".to_string()))?;

    let mut blob = Vec::with_capacity(sealed_len(plaintext.len()));
    blob.push(version.tag());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    debug!(version = version.tag(), sealed_len = blob.len(), "sealed secret");
    Ok(blob)
}

/// Open a sealed blob with a passphrase.
///
/// # Errors
///
/// - `KeyholderError::MalformedBlob` if the blob is shorter than its header
///   or has an unknown format version
/// - `KeyholderError::Authentication` if the passphrase is wrong or any
///   byte after the version tag was altered; the two are not distinguished
pub fn open(blob: &[u8], passphrase: &str) -> Result<SecretString> {
    let sealed = SealedBlob::parse(blob)?;
    let key = derive_key_for(sealed.version, passphrase, sealed.salt);

    let (nonce, ciphertext) = sealed
        .nonce_and_ciphertext()
        .ok_or(KeyholderError::Authentication)?;

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let aad = [sealed.version.tag()];
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: &aad,
            },
        )
        .map_err(|_| KeyholderError::Authentication)?;

    let text = String::from_utf8(plaintext).map_err(|_| KeyholderError::Authentication)?;
    debug!(version = sealed.version.tag(), "opened secret");
    Ok(SecretString::from(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::format::{HEADER_LEN, MIN_SEALED_LEN, SALT_LEN, TAG_LEN};
    use secrecy::ExposeSecret;

    #[test]
    fn test_seal_open_round_trip() {
        let blob = seal("Hello, World! This is secret data.", "test-passphrase").unwrap();
        let opened = open(&blob, "test-passphrase").unwrap();
        assert_eq!(opened.expose_secret(), "Hello, World! This is secret data.");
    }

    #[test]
    fn test_blob_layout() {
        let plaintext = "super-secret";
        let blob = seal(plaintext, "pwd123").unwrap();

        assert_eq!(blob[0], FormatVersion::CURRENT.tag());
        assert_eq!(blob.len(), sealed_len(plaintext.len()));
        assert!(blob.len() >= MIN_SEALED_LEN);
        assert_eq!(blob.len() - HEADER_LEN - NONCE_LEN - TAG_LEN, plaintext.len());
    }

    #[test]
    fn test_blob_does_not_contain_plaintext() {
        let blob = seal("plaintext-marker", "pwd123").unwrap();
        assert!(!blob
            .windows(b"plaintext-marker".len())
            .any(|w| w == b"plaintext-marker"));
    }

    #[test]
    fn test_wrong_passphrase_is_authentication_error() {
        let blob = seal("secret data", "correct-passphrase").unwrap();
        let result = open(&blob, "wrong-passphrase");
        assert!(matches!(result, Err(KeyholderError::Authentication)));
    }

    #[test]
    fn test_salt_matches_derivation_input() {
        let blob = seal("secret", "pwd123").unwrap();
        let salt: [u8; SALT_LEN] = blob[1..HEADER_LEN].try_into().unwrap();
        let key = derive_key_for(FormatVersion::V1, "pwd123", &salt);

        let nonce = &blob[HEADER_LEN..HEADER_LEN + NONCE_LEN];
        let cipher = Aes256Gcm::new(key.as_bytes().into());
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: &blob[HEADER_LEN + NONCE_LEN..],
                    aad: &[FormatVersion::V1.tag()],
                },
            )
            .unwrap();
        assert_eq!(plaintext, b"secret");
    }

    #[test]
    fn test_header_only_blob_fails_authentication() {
        let blob = seal("secret", "pwd123").unwrap();
        let result = open(&blob[..HEADER_LEN], "pwd123");
        assert!(matches!(result, Err(KeyholderError::Authentication)));
    }

    #[test]
    fn test_truncated_tag_fails_authentication() {
        let blob = seal("secret", "pwd123").unwrap();
        let result = open(&blob[..blob.len() - 1], "pwd123");
        assert!(matches!(result, Err(KeyholderError::Authentication)));
    }

    #[test]
    fn test_empty_passphrase_seals() {
        let blob = seal("secret", "").unwrap();
        assert_eq!(open(&blob, "").unwrap().expose_secret(), "secret");
        assert!(open(&blob, " ").is_err());
    }
}
