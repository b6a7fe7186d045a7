//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored secret: label plus sealed blob.
#[derive(Debug, Clone)]
pub struct KeyRecord {
    /// Unique identifier for this record
    pub id: Uuid,

    /// User-facing unique label (e.g., "github-token")
    pub label: String,

    /// Sealed blob; the only form in which the secret is persisted
    pub sealed: Vec<u8>,

    /// When this record was created
    pub created_at: DateTime<Utc>,

    /// Last time the label or the sealed value changed
    pub updated_at: DateTime<Utc>,
}

impl KeyRecord {
    pub fn summary(&self) -> KeySummary {
        KeySummary {
            label: self.label.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing view of a record. Never carries the sealed blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySummary {
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Builder for creating new records.
#[derive(Debug, Clone)]
pub struct NewKey {
    pub label: String,
    pub sealed: Vec<u8>,
}

impl NewKey {
    pub fn new(label: impl Into<String>, sealed: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            sealed,
        }
    }
}

/// Changes to apply to an existing record. `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct KeyChanges {
    pub label: Option<String>,
    pub sealed: Option<Vec<u8>>,
}

impl KeyChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn reseal(mut self, sealed: Vec<u8>) -> Self {
        self.sealed = Some(sealed);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.sealed.is_none()
    }
}

/// Filter for listing records.
#[derive(Debug, Clone, Default)]
pub struct KeyFilter {
    /// Case-insensitive label substring
    pub search: Option<String>,

    /// Order by creation time, newest first (default: oldest first)
    pub newest_first: bool,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl KeyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A service user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,

    /// Argon2id PHC string
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Builder for creating new users.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            is_admin: false,
        }
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}
