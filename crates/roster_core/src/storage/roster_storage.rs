//! Persistence adapter between the record collection and key-value storage.
//!
//! # Invariants
//! - `load` never fails: missing, unreadable or malformed data yields an
//!   empty collection and an `error` log line.
//! - `save` writes the whole collection as one JSON array under one key.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::model::student::StudentRecord;
use log::{debug, error};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "students";

/// Serializes the roster under a fixed key of a [`KeyValueStore`].
pub struct RosterStorage<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> RosterStorage<S> {
    /// Binds the adapter to [`DEFAULT_STORAGE_KEY`].
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Reads the persisted roster.
    pub fn load(&self) -> Vec<StudentRecord> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=roster_load module=storage status=empty key={}", self.key);
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=roster_load module=storage status=error error_code=read_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StudentRecord>>(&raw) {
            Ok(records) => {
                debug!(
                    "event=roster_load module=storage status=ok key={} count={}",
                    self.key,
                    records.len()
                );
                records
            }
            Err(err) => {
                error!(
                    "event=roster_load module=storage status=error error_code=corrupt_data key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the persisted roster with `records`.
    pub fn save(&self, records: &[StudentRecord]) -> StorageResult<()> {
        let raw = serde_json::to_string(records).map_err(StorageError::Serialize)?;
        self.kv.set(&self.key, &raw)?;
        debug!(
            "event=roster_save module=storage status=ok key={} count={}",
            self.key,
            records.len()
        );
        Ok(())
    }
}
