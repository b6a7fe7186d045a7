//! Keys service: validation, sealing and persistence in one place.
//!
//! Every operation logs the label it touched and nothing else. Secrets,
//! passphrases and derived keys never reach a tracing field.

use secrecy::SecretString;
use tracing::{info, warn};
use uuid::Uuid;

use crate::crypto::{open, seal};
use crate::error::{Field, KeyholderError, Result, ValidationError};
use crate::storage::{KeyChanges, KeyFilter, KeyRecord, KeyStore, KeySummary, NewKey};
use crate::validation::{validate_label, validate_passphrase, validate_secret};

/// Requested changes to an existing key.
///
/// `secret` and `passphrase` re-seal the value and must be given together.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyUpdate<'a> {
    pub label: Option<&'a str>,
    pub secret: Option<&'a str>,
    pub passphrase: Option<&'a str>,
}

impl<'a> KeyUpdate<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn reseal(mut self, secret: &'a str, passphrase: &'a str) -> Self {
        self.secret = Some(secret);
        self.passphrase = Some(passphrase);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.secret.is_none() && self.passphrase.is_none()
    }
}

/// Create, list, update, delete and decrypt labelled secrets.
pub struct KeyService<S> {
    store: S,
}

impl<S: KeyStore> KeyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Seal `secret` under `passphrase` and store it as `label`.
    ///
    /// # Errors
    ///
    /// `Validation` for out-of-range input, `AlreadyExists` if the label is
    /// taken.
    pub fn create(&mut self, label: &str, secret: &str, passphrase: &str) -> Result<Uuid> {
        validate_label(label)?;
        validate_secret(secret)?;
        validate_passphrase(passphrase)?;

        if self.store.label_exists(label)? {
            return Err(KeyholderError::AlreadyExists(format!("label \"{}\"", label)));
        }

        let sealed = seal(secret, passphrase)?;
        let id = self.store.insert_key(&NewKey::new(label, sealed))?;
        info!(label, "key created");
        Ok(id)
    }

    pub fn list(&self, filter: &KeyFilter) -> Result<Vec<KeySummary>> {
        self.store.list_keys(filter)
    }

    /// Rename and/or re-seal an existing key.
    ///
    /// A re-seal always draws a fresh salt and nonce, even when the
    /// passphrase is unchanged.
    pub fn update(&mut self, label: &str, update: KeyUpdate<'_>) -> Result<KeySummary> {
        if update.is_empty() {
            return Err(ValidationError::Other("nothing to update".to_string()).into());
        }

        let reseal = match (update.secret, update.passphrase) {
            (Some(secret), Some(passphrase)) => {
                validate_secret(secret)?;
                validate_passphrase(passphrase)?;
                Some((secret, passphrase))
            }
            (None, None) => None,
            _ => return Err(ValidationError::Incomplete(Field::Secret, Field::Passphrase).into()),
        };
        if let Some(new_label) = update.label {
            validate_label(new_label)?;
        }

        if !self.store.label_exists(label)? {
            return Err(not_found(label));
        }
        if let Some(new_label) = update.label {
            if new_label != label && self.store.label_exists(new_label)? {
                return Err(KeyholderError::AlreadyExists(format!(
                    "label \"{}\"",
                    new_label
                )));
            }
        }

        let mut changes = KeyChanges::new();
        if let Some(new_label) = update.label {
            changes = changes.rename(new_label);
        }
        if let Some((secret, passphrase)) = reseal {
            changes = changes.reseal(seal(secret, passphrase)?);
        }

        let record = self.store.update_key(label, &changes)?;
        info!(
            label,
            new_label = update.label,
            resealed = reseal.is_some(),
            "key updated"
        );
        Ok(record.summary())
    }

    pub fn delete(&mut self, label: &str) -> Result<()> {
        if !self.store.delete_key(label)? {
            return Err(not_found(label));
        }
        info!(label, "key deleted");
        Ok(())
    }

    /// Open the secret stored under `label`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such key, `Authentication` for a wrong passphrase or
    /// a corrupted blob.
    pub fn decrypt(&self, label: &str, passphrase: &str) -> Result<SecretString> {
        validate_passphrase(passphrase)?;
        let record = self.fetch(label)?;

        match open(&record.sealed, passphrase) {
            Ok(secret) => {
                info!(label, "key decrypted");
                Ok(secret)
            }
            Err(err) => {
                warn!(label, error = %err, "decryption failed");
                Err(err)
            }
        }
    }

    fn fetch(&self, label: &str) -> Result<KeyRecord> {
        self.store.get_key(label)?.ok_or_else(|| not_found(label))
    }
}

fn not_found(label: &str) -> KeyholderError {
    KeyholderError::NotFound(format!("key \"{}\"", label))
}
