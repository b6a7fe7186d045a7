//! Row types for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{KeyholderError, Result};
use crate::storage::types::{KeyRecord, KeySummary, User};

pub(super) const KEY_COLUMNS: &str = "id, label, sealed, created_at, updated_at";
pub(super) const USER_COLUMNS: &str = "id, username, password_hash, is_admin, created_at";

/// Raw row data from the keys table, before parsing into domain types.
#[derive(Debug)]
pub struct KeyRow {
    pub id: String,
    pub label: String,
    pub sealed: Vec<u8>,
    pub created_at: String,
    pub updated_at: String,
}

impl KeyRow {
    pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            label: row.get(1)?,
            sealed: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

/// Raw row data from the users table.
#[derive(Debug)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: String,
}

impl UserRow {
    pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            is_admin: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| KeyholderError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| KeyholderError::Storage(format!("Invalid UUID: {}", e)))
}

impl TryFrom<KeyRow> for KeyRecord {
    type Error = KeyholderError;

    fn try_from(row: KeyRow) -> Result<Self> {
        Ok(KeyRecord {
            id: parse_uuid(&row.id)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            label: row.label,
            sealed: row.sealed,
        })
    }
}

impl TryFrom<KeyRow> for KeySummary {
    type Error = KeyholderError;

    fn try_from(row: KeyRow) -> Result<Self> {
        Ok(KeySummary {
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            label: row.label,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = KeyholderError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: parse_uuid(&row.id)?,
            created_at: parse_timestamp(&row.created_at)?,
            username: row.username,
            password_hash: row.password_hash,
            is_admin: row.is_admin,
        })
    }
}
