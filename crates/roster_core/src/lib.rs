//! Core domain logic for the student roster.
//! This crate is the single source of truth for roster invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use config::RosterConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{StudentFields, StudentRecord};
pub use model::validation::{validate_fields, StudentField, ValidationError};
pub use repo::roster_store::{RosterStore, StoreError, StoreResult};
pub use service::roster_controller::{
    CommandOutcome, FormMode, RejectReason, RosterCommand, RosterController, RosterView,
};
pub use storage::{
    KeyValueStore, RosterStorage, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use view::layout::table_max_height;
pub use view::notification::{Notification, NotificationCenter, NotificationPhase};
pub use view::table::{
    escape_html, parse_row_action, render_table, RowAction, RowActionKind, TableRow, TableView,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the configured database and returns a ready controller.
pub fn open_controller(
    config: &RosterConfig,
) -> Result<RosterController<SqliteKeyValueStore>, db::DbError> {
    let conn = db::open_db(&config.db_path)?;
    let storage = RosterStorage::with_key(SqliteKeyValueStore::new(conn), &config.storage_key);
    Ok(RosterController::new(RosterStore::open(storage)))
}
