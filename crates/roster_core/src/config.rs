//! Runtime configuration for roster hosts.
//!
//! # Responsibility
//! - Resolve database path, storage key and logging settings.
//! - Keep environment access in one place so hosts stay thin.
//!
//! # Invariants
//! - Blank values fall back to defaults.
//! - Resolution never fails; validation of the log level happens in
//!   [`crate::init_logging`].

use crate::logging::default_log_level;
use crate::storage::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "ROSTER_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Key the roster is stored under.
    pub storage_key: String,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Reads configuration from process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: value(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            storage_key: value(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            log_level: value(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: value(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}
