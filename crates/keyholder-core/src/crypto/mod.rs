//! Cryptographic operations for Keyholder.
//!
//! - **PBKDF2-HMAC-SHA256**: passphrase key derivation, 200,000 iterations
//! - **AES-256-GCM**: authenticated encryption of each secret
//!
//! ## Security Model
//!
//! - Every secret is sealed under its own salt and nonce
//! - Keys are re-derived on every call and zeroized on drop
//! - Wrong passphrase and corrupted data produce the same error
//! - Plaintexts, passphrases and keys are never logged
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the database holding the sealed blobs
//! - Offline brute-force and precomputed-table attacks on passphrases
//! - Tampering with stored blobs
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - A caller that already holds the passphrase

pub mod envelope;
pub mod format;
pub mod key;

pub use envelope::{open, seal};
pub use format::{
    sealed_len, FormatVersion, SealedBlob, KEY_LEN, MAX_SEALED_LEN, MIN_SEALED_LEN, NONCE_LEN,
    PBKDF2_ITERATIONS, SALT_LEN, TAG_LEN,
};
pub use key::{derive_key, generate_salt, DerivedKey};
