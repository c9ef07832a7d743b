//! Durable key-value persistence for the roster.
//!
//! # Responsibility
//! - Define the key-value contract the roster is mirrored into.
//! - Translate between the record collection and its serialized form.
//!
//! # Invariants
//! - Reads of absent or unparsable data never surface an error.
//! - Writes fully overwrite the previous value under the same key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod roster_storage;
pub mod sqlite_kv;

pub use roster_storage::{RosterStorage, DEFAULT_STORAGE_KEY};
pub use sqlite_kv::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure in the durable storage medium or in serialization.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize roster: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value store the roster is persisted into.
///
/// Mirrors the browser-storage shape: one string value per key, no
/// transactions across keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
