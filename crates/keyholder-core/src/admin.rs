//! Admin account provisioning.
//!
//! Provisioning is idempotent: running it against a store that already has
//! an admin is a no-op that reports so, never an error.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::info;

use crate::crypto::generate_salt;
use crate::error::{KeyholderError, Result, ValidationError};
use crate::storage::{NewUser, UserStore};

/// Username of the provisioned admin account.
pub const ADMIN_USERNAME: &str = "admin";

/// Outcome of [`provision_admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Outcome of [`remove_admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    Deleted,
    Missing,
}

/// Create the admin account unless it already exists.
///
/// Surrounding whitespace is stripped from the password before hashing, and
/// again by [`verify_admin`].
///
/// # Errors
///
/// Returns `KeyholderError::Validation` for an empty or whitespace-only
/// password. An existing admin is reported as [`Provisioned::AlreadyExists`].
pub fn provision_admin<S: UserStore + ?Sized>(store: &mut S, password: &str) -> Result<Provisioned> {
    let password = password.trim();
    if password.is_empty() {
        return Err(ValidationError::Other("admin password cannot be empty".to_string()).into());
    }

    if store.get_user(ADMIN_USERNAME)?.is_some() {
        info!(username = ADMIN_USERNAME, "admin already provisioned");
        return Ok(Provisioned::AlreadyExists);
    }

    let hash = hash_password(password)?;
    store.insert_user(&NewUser::new(ADMIN_USERNAME, hash).admin())?;
    info!(username = ADMIN_USERNAME, "admin provisioned");
    Ok(Provisioned::Created)
}

/// Delete the admin account if present.
pub fn remove_admin<S: UserStore + ?Sized>(store: &mut S) -> Result<Removed> {
    if store.delete_user(ADMIN_USERNAME)? {
        info!(username = ADMIN_USERNAME, "admin removed");
        Ok(Removed::Deleted)
    } else {
        Ok(Removed::Missing)
    }
}

/// Check `password` against the stored admin hash.
///
/// # Errors
///
/// Returns `KeyholderError::NotFound` if no admin has been provisioned.
pub fn verify_admin<S: UserStore + ?Sized>(store: &S, password: &str) -> Result<bool> {
    let user = store
        .get_user(ADMIN_USERNAME)?
        .ok_or_else(|| KeyholderError::NotFound(format!("user \"{}\"", ADMIN_USERNAME)))?;

    let parsed = PasswordHash::new(&user.password_hash)
        .map_err(|e| KeyholderError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.trim().as_bytes(), &parsed)
        .is_ok())
}

fn hash_password(password: &str) -> Result<String> {
    let salt_bytes = generate_salt()?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| KeyholderError::PasswordHash(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| KeyholderError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}
