//! SQLite-backed key-value store.

use super::{KeyValueStore, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over the `kv_entries` table.
///
/// Owns its connection so a long-lived session can hold it.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
