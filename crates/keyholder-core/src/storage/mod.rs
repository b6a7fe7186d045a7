//! Storage abstraction for Keyholder.
//!
//! The storage layer is backend-agnostic: services depend on the
//! `KeyStore` and `UserStore` traits, and `SqliteStore` is the bundled
//! implementation.
//!
//! ## Security
//!
//! Stores only ever receive sealed blobs and password hashes. Sealing and
//! hashing happen in the layers above.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::{KeyStore, UserStore};
pub use types::{KeyChanges, KeyFilter, KeyRecord, KeySummary, NewKey, NewUser, User};
