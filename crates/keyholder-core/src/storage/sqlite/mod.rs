//! SQLite storage backend.
//!
//! Secrets are sealed before they reach this layer, so the database file
//! itself is stored as plain SQLite. Each row holds one opaque sealed blob.

mod row;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::crypto::SealedBlob;
use crate::error::{KeyholderError, Result};
use crate::storage::traits::{KeyStore, UserStore};
use crate::storage::types::{KeyChanges, KeyFilter, KeyRecord, KeySummary, NewKey, NewUser, User};
use crate::validation::validate_label;

use row::{KeyRow, UserRow, KEY_COLUMNS, USER_COLUMNS};
use validation::{check_sealed_size, label_matches};

/// Schema version recorded in the `meta` table.
pub const SCHEMA_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS keys (
        id TEXT PRIMARY KEY,
        label TEXT NOT NULL UNIQUE,
        sealed BLOB NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    );
"#;

/// SQLite-backed key and user store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at `path`, creating parent directories and
    /// the schema as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match version {
            None => {
                conn.execute(
                    "INSERT INTO meta (key, value) VALUES ('schema_version', ?)",
                    [SCHEMA_VERSION],
                )?;
                conn.execute(
                    "INSERT INTO meta (key, value) VALUES ('created_at', ?)",
                    [now_timestamp()],
                )?;
            }
            Some(ref value) if value == SCHEMA_VERSION => {}
            Some(value) => {
                return Err(KeyholderError::Storage(format!(
                    "Unsupported schema version {} (expected {})",
                    value, SCHEMA_VERSION
                )))
            }
        }

        debug!(path = ?path, "opened sqlite store");
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| KeyholderError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Check database integrity.
    ///
    /// Verifies:
    /// - SQLite page integrity
    /// - Every sealed blob carries a parseable header
    ///
    /// Sealed values cannot be checked further without their passphrases.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(KeyholderError::Storage(format!(
                "Integrity check failed: {}",
                status
            )));
        }

        let mut stmt = conn.prepare("SELECT label, sealed FROM keys")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;
        for row in rows {
            let (label, sealed) = row?;
            SealedBlob::parse(&sealed).map_err(|e| match e {
                KeyholderError::MalformedBlob(reason) => {
                    KeyholderError::MalformedBlob(format!("{}: {}", label, reason))
                }
                other => other,
            })?;
        }

        Ok(())
    }

    fn fetch_key(conn: &Connection, label: &str) -> Result<Option<KeyRecord>> {
        let sql = format!("SELECT {} FROM keys WHERE label = ?", KEY_COLUMNS);
        let row = conn
            .query_row(&sql, [label], KeyRow::from_row)
            .optional()?;
        row.map(KeyRecord::try_from).transpose()
    }

    fn label_taken(conn: &Connection, label: &str) -> Result<bool> {
        let exists: Option<i64> = conn
            .query_row("SELECT 1 FROM keys WHERE label = ?", [label], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(exists.is_some())
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Map unique-constraint violations to `AlreadyExists`.
fn constraint_error(err: rusqlite::Error, what: &str) -> KeyholderError {
    match err {
        rusqlite::Error::SqliteFailure(ref inner, _)
            if inner.code == ErrorCode::ConstraintViolation =>
        {
            KeyholderError::AlreadyExists(what.to_string())
        }
        other => other.into(),
    }
}

impl KeyStore for SqliteStore {
    fn insert_key(&mut self, key: &NewKey) -> Result<Uuid> {
        validate_label(&key.label)?;
        check_sealed_size(&key.sealed)?;

        let conn = self.lock_conn()?;
        if Self::label_taken(&conn, &key.label)? {
            return Err(KeyholderError::AlreadyExists(format!(
                "label \"{}\"",
                key.label
            )));
        }

        let id = Uuid::now_v7();
        let now = now_timestamp();
        conn.execute(
            "INSERT INTO keys (id, label, sealed, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            (id.to_string(), &key.label, &key.sealed, &now, &now),
        )
        .map_err(|e| constraint_error(e, &format!("label \"{}\"", key.label)))?;

        Ok(id)
    }

    fn get_key(&self, label: &str) -> Result<Option<KeyRecord>> {
        let conn = self.lock_conn()?;
        Self::fetch_key(&conn, label)
    }

    fn list_keys(&self, filter: &KeyFilter) -> Result<Vec<KeySummary>> {
        let conn = self.lock_conn()?;
        let order = if filter.newest_first { "DESC" } else { "ASC" };
        let sql = format!(
            "SELECT {} FROM keys ORDER BY created_at {}, rowid {}",
            KEY_COLUMNS, order, order
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], KeyRow::from_row)?;

        let mut summaries = Vec::new();
        for row in rows {
            if filter.limit.is_some_and(|limit| summaries.len() >= limit) {
                break;
            }
            let row = row?;
            if let Some(ref search) = filter.search {
                if !label_matches(&row.label, search) {
                    continue;
                }
            }
            summaries.push(KeySummary::try_from(row)?);
        }

        Ok(summaries)
    }

    fn label_exists(&self, label: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        Self::label_taken(&conn, label)
    }

    fn update_key(&mut self, label: &str, changes: &KeyChanges) -> Result<KeyRecord> {
        if let Some(ref new_label) = changes.label {
            validate_label(new_label)?;
        }
        if let Some(ref sealed) = changes.sealed {
            check_sealed_size(sealed)?;
        }

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let existing = Self::fetch_key(&tx, label)?
            .ok_or_else(|| KeyholderError::NotFound(format!("key \"{}\"", label)))?;
        if changes.is_empty() {
            return Ok(existing);
        }

        let new_label = changes.label.as_deref().unwrap_or(&existing.label);
        if new_label != existing.label && Self::label_taken(&tx, new_label)? {
            return Err(KeyholderError::AlreadyExists(format!(
                "label \"{}\"",
                new_label
            )));
        }
        let sealed = changes.sealed.as_ref().unwrap_or(&existing.sealed);

        tx.execute(
            "UPDATE keys SET label = ?, sealed = ?, updated_at = ? WHERE id = ?",
            (new_label, sealed, now_timestamp(), existing.id.to_string()),
        )
        .map_err(|e| constraint_error(e, &format!("label \"{}\"", new_label)))?;

        let updated = Self::fetch_key(&tx, new_label)?
            .ok_or_else(|| KeyholderError::Storage("Updated key vanished".to_string()))?;
        tx.commit()?;

        Ok(updated)
    }

    fn delete_key(&mut self, label: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute("DELETE FROM keys WHERE label = ?", [label])?;
        Ok(deleted > 0)
    }
}

impl UserStore for SqliteStore {
    fn get_user(&self, username: &str) -> Result<Option<User>> {
        let conn = self.lock_conn()?;
        let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
        let row = conn
            .query_row(&sql, [username], UserRow::from_row)
            .optional()?;
        row.map(User::try_from).transpose()
    }

    fn insert_user(&mut self, user: &NewUser) -> Result<Uuid> {
        let conn = self.lock_conn()?;
        let id = Uuid::now_v7();
        conn.execute(
            "INSERT INTO users (id, username, password_hash, is_admin, created_at) VALUES (?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &user.username,
                &user.password_hash,
                user.is_admin,
                now_timestamp(),
            ),
        )
        .map_err(|e| constraint_error(e, &format!("user \"{}\"", user.username)))?;
        Ok(id)
    }

    fn delete_user(&mut self, username: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute("DELETE FROM users WHERE username = ?", [username])?;
        Ok(deleted > 0)
    }
}
