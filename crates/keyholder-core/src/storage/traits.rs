//! Storage trait definitions.
//!
//! `KeyStore` holds sealed secrets, `UserStore` holds service users. The
//! stores never see plaintext or passphrases: sealing happens before a
//! record reaches them.

use uuid::Uuid;

use super::types::{KeyChanges, KeyFilter, KeyRecord, KeySummary, NewKey, NewUser, User};
use crate::error::Result;

/// Persistence for sealed secrets, keyed by unique label.
///
/// All implementations must ensure:
/// - Labels are unique
/// - A sealed blob is replaced whole, never patched
/// - `updated_at` moves forward on every change
pub trait KeyStore: Send {
    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `KeyholderError::AlreadyExists` if the label is taken, or
    /// `KeyholderError::Validation` if the label or blob size is out of range.
    fn insert_key(&mut self, key: &NewKey) -> Result<Uuid>;

    /// Get a record by label.
    ///
    /// Returns `Ok(None)` if not found.
    fn get_key(&self, label: &str) -> Result<Option<KeyRecord>>;

    /// List records matching the filter.
    fn list_keys(&self, filter: &KeyFilter) -> Result<Vec<KeySummary>>;

    /// Check whether a label is taken.
    fn label_exists(&self, label: &str) -> Result<bool>;

    /// Apply changes to the record with the given label.
    ///
    /// # Errors
    ///
    /// Returns `KeyholderError::NotFound` if no record has `label`, and
    /// `KeyholderError::AlreadyExists` if a rename collides.
    fn update_key(&mut self, label: &str, changes: &KeyChanges) -> Result<KeyRecord>;

    /// Delete a record. Returns `false` if it did not exist.
    fn delete_key(&mut self, label: &str) -> Result<bool>;
}

/// Persistence for service users.
pub trait UserStore: Send {
    /// Get a user by username.
    fn get_user(&self, username: &str) -> Result<Option<User>>;

    /// Insert a user.
    ///
    /// # Errors
    ///
    /// Returns `KeyholderError::AlreadyExists` if the username is taken.
    fn insert_user(&mut self, user: &NewUser) -> Result<Uuid>;

    /// Delete a user. Returns `false` if it did not exist.
    fn delete_user(&mut self, username: &str) -> Result<bool>;
}
