//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose roster commands to Dart via FRB as sync calls.
//! - Hold one process-wide roster session (store, edit cursor, notifications).
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every roster call returns the full current state, so the UI can
//!   replace its rows and form without keeping its own copy.
//! - Delete confirmation happens in the UI; `confirmed=false` is a decline.

use log::{error, warn};
use roster_core::view::table::EMPTY_ROSTER_MESSAGE;
use roster_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_controller,
    ping as ping_inner, table_max_height, CommandOutcome, FormMode, NotificationCenter,
    RosterCommand, RosterConfig, RosterController, RosterView, SqliteKeyValueStore,
    StudentFields, TableView,
};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

static SESSION: OnceLock<Mutex<Option<RosterSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One roster row as plain (unescaped) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub index: u32,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub contact: String,
}

/// Form field values the UI should display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterForm {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub contact: String,
}

/// One live toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterNotification {
    /// Stable id so the UI can dismiss it independently.
    pub id: String,
    pub message: String,
    /// Milliseconds until the toast is fully gone.
    pub remaining_ms: u64,
}

/// Response envelope for every roster call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterResponse {
    /// Whether the command took effect.
    pub ok: bool,
    /// Last status message produced by the command, if any.
    pub message: String,
    pub notifications: Vec<RosterNotification>,
    /// Rows in store order; empty means the UI shows `empty_message`.
    pub rows: Vec<RosterRow>,
    pub empty_message: String,
    pub submit_label: String,
    pub form: RosterForm,
    pub editing_index: Option<u32>,
}

impl RosterResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            notifications: Vec::new(),
            rows: Vec::new(),
            empty_message: EMPTY_ROSTER_MESSAGE.to_string(),
            submit_label: FormMode::Add.submit_label().to_string(),
            form: RosterForm::default(),
            editing_index: None,
        }
    }
}

/// Returns current roster state without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_snapshot() -> RosterResponse {
    with_session(|session| session.snapshot())
}

/// Loads row `index` into the form for editing.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_edit(index: u32) -> RosterResponse {
    with_session(|session| session.run(RosterCommand::Edit(index as usize), true))
}

/// Deletes row `index` when the user `confirmed` the prompt.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_delete(index: u32, confirmed: bool) -> RosterResponse {
    with_session(|session| session.run(RosterCommand::Delete(index as usize), confirmed))
}

/// Submits the form in its current add/edit mode.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_submit(
    name: String,
    student_id: String,
    email: String,
    contact: String,
) -> RosterResponse {
    let fields = StudentFields::new(name, student_id, email, contact);
    with_session(|session| session.run(RosterCommand::Submit(fields), true))
}

/// Clears the form and leaves edit mode.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_reset() -> RosterResponse {
    with_session(|session| session.run(RosterCommand::Reset, true))
}

/// Max height in logical pixels for the scrollable table area.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_table_max_height(
    viewport_height: f64,
    header_height: Option<f64>,
    form_height: Option<f64>,
) -> f64 {
    table_max_height(viewport_height, header_height, form_height)
}

struct RosterSession {
    controller: RosterController<SqliteKeyValueStore>,
    notifications: NotificationCenter,
}

/// Collects controller callbacks for one FFI call.
struct SessionView<'a> {
    notifications: &'a mut NotificationCenter,
    now: Instant,
    confirmed: bool,
    last_message: Option<String>,
}

impl RosterView for SessionView<'_> {
    fn notify(&mut self, message: &str) {
        self.notifications.push(message, self.now);
        self.last_message = Some(message.to_string());
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirmed
    }

    // Responses always carry the full row set.
    fn render(&mut self, _table: &TableView) {}
}

impl RosterSession {
    /// Opens the configured database. No fallback: a session that cannot
    /// persist is refused so the next call retries the open.
    fn open(config: &RosterConfig) -> Result<Self, String> {
        let controller = open_controller(config).map_err(|err| {
            error!("event=ffi_session_open module=ffi status=error error={err}");
            format!("roster DB open failed: {err}")
        })?;
        Ok(Self::with_controller(controller))
    }

    fn with_controller(controller: RosterController<SqliteKeyValueStore>) -> Self {
        Self {
            controller,
            notifications: NotificationCenter::default(),
        }
    }

    fn run(&mut self, command: RosterCommand, confirmed: bool) -> RosterResponse {
        let now = Instant::now();
        self.notifications.prune(now);
        let mut view = SessionView {
            notifications: &mut self.notifications,
            now,
            confirmed,
            last_message: None,
        };

        let result = self.controller.dispatch(command, &mut view);
        let message = view.last_message.take().unwrap_or_default();
        let ok = match result {
            Ok(outcome) => matches!(
                outcome,
                CommandOutcome::EditStarted(_)
                    | CommandOutcome::Added(_)
                    | CommandOutcome::Updated(_)
                    | CommandOutcome::Deleted(_)
                    | CommandOutcome::Reset
            ),
            Err(err) => {
                warn!("event=ffi_command module=ffi status=error error={err}");
                false
            }
        };

        self.response(ok, message, now)
    }

    fn snapshot(&mut self) -> RosterResponse {
        let now = Instant::now();
        self.notifications.prune(now);
        self.response(true, String::new(), now)
    }

    fn response(&self, ok: bool, message: String, now: Instant) -> RosterResponse {
        let store = self.controller.store();
        let form = self.controller.form();
        RosterResponse {
            ok,
            message,
            notifications: self
                .notifications
                .visible(now)
                .map(|item| RosterNotification {
                    id: item.id.to_string(),
                    message: item.message.clone(),
                    remaining_ms: self.notifications.remaining(item, now).as_millis() as u64,
                })
                .collect(),
            rows: store
                .records()
                .iter()
                .enumerate()
                .map(|(index, record)| RosterRow {
                    index: index as u32,
                    name: record.name.clone(),
                    student_id: record.student_id.clone(),
                    email: record.email.clone(),
                    contact: record.contact.clone(),
                })
                .collect(),
            empty_message: EMPTY_ROSTER_MESSAGE.to_string(),
            submit_label: self.controller.submit_label().to_string(),
            form: RosterForm {
                name: form.name.clone(),
                student_id: form.student_id.clone(),
                email: form.email.clone(),
                contact: form.contact.clone(),
            },
            editing_index: self.controller.mode().edit_index().map(|i| i as u32),
        }
    }
}

fn with_session(f: impl FnOnce(&mut RosterSession) -> RosterResponse) -> RosterResponse {
    let slot = SESSION.get_or_init(|| Mutex::new(None));
    with_session_in(slot, RosterConfig::from_env, f)
}

fn with_session_in(
    slot: &Mutex<Option<RosterSession>>,
    config: impl FnOnce() -> RosterConfig,
    f: impl FnOnce(&mut RosterSession) -> RosterResponse,
) -> RosterResponse {
    let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.is_none() {
        match RosterSession::open(&config()) {
            Ok(session) => *guard = Some(session),
            Err(err) => return RosterResponse::failure(err),
        }
    }
    match guard.as_mut() {
        Some(session) => f(session),
        None => RosterResponse::failure("roster session unavailable"),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, roster_table_max_height, with_session_in,
        RosterCommand, RosterSession,
    };
    use roster_core::db::open_db_in_memory;
    use roster_core::{
        RosterConfig, RosterController, RosterStorage, RosterStore, SqliteKeyValueStore,
        StudentFields,
    };
    use std::sync::Mutex;

    fn session() -> RosterSession {
        let kv = SqliteKeyValueStore::new(open_db_in_memory().unwrap());
        let store = RosterStore::open(RosterStorage::new(kv));
        RosterSession::with_controller(RosterController::new(store))
    }

    fn unopenable_config() -> RosterConfig {
        let dir = tempfile::tempdir().unwrap();
        RosterConfig {
            // Parent directory no longer exists once `dir` is dropped.
            db_path: dir.path().join("missing").join("roster.sqlite3"),
            ..RosterConfig::default()
        }
    }

    fn submit(session: &mut RosterSession, name: &str, id: &str) -> super::RosterResponse {
        let fields = StudentFields::new(name, id, "a@b.com", "1234567890");
        session.run(RosterCommand::Submit(fields), true)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/roster-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn table_height_is_clamped() {
        assert_eq!(roster_table_max_height(100.0, None, None), 150.0);
    }

    #[test]
    fn submit_returns_rows_and_notification() {
        let mut session = session();
        let response = submit(&mut session, "Ann Lee", "1");

        assert!(response.ok, "{}", response.message);
        assert_eq!(response.message, "Student added successfully.");
        assert_eq!(response.rows.len(), 1);
        assert_eq!(response.rows[0].student_id, "1");
        assert_eq!(response.submit_label, "Add Student");
        assert_eq!(response.form, super::RosterForm::default());
        assert_eq!(response.notifications.len(), 1);
        assert!(response.notifications[0].remaining_ms <= 2100);
    }

    #[test]
    fn rejected_submit_is_not_ok() {
        let mut session = session();
        submit(&mut session, "Ann Lee", "1");
        let response = submit(&mut session, "Bo Chen", "1");

        assert!(!response.ok);
        assert_eq!(
            response.message,
            "A student with this Student ID already exists."
        );
        assert_eq!(response.rows.len(), 1);
        assert_eq!(response.form.name, "Bo Chen");
        // Both toasts stay independent.
        assert_eq!(response.notifications.len(), 2);
    }

    #[test]
    fn edit_and_unconfirmed_delete_keep_state() {
        let mut session = session();
        submit(&mut session, "Ann Lee", "1");

        let editing = session.run(RosterCommand::Edit(0), true);
        assert_eq!(editing.editing_index, Some(0));
        assert_eq!(editing.submit_label, "Update Student");
        assert_eq!(editing.form.name, "Ann Lee");

        let declined = session.run(RosterCommand::Delete(0), false);
        assert!(!declined.ok);
        assert_eq!(declined.rows.len(), 1);
        assert_eq!(declined.editing_index, Some(0));

        let deleted = session.run(RosterCommand::Delete(0), true);
        assert!(deleted.ok);
        assert!(deleted.rows.is_empty());
        assert_eq!(deleted.editing_index, None);
    }

    #[test]
    fn open_fails_when_database_cannot_be_created() {
        let config = unopenable_config();
        let err = RosterSession::open(&config).err().expect("open should fail");
        assert!(err.contains("roster DB open failed"));
        assert!(!config.db_path.exists());
    }

    #[test]
    fn unopenable_database_yields_failure_and_retries_next_call() {
        let slot = Mutex::new(None);
        let response = with_session_in(&slot, unopenable_config, |session| {
            let fields = StudentFields::new("Ann Lee", "1", "a@b.com", "1234567890");
            session.run(RosterCommand::Submit(fields), true)
        });

        assert!(!response.ok);
        assert!(response.message.contains("roster DB open failed"));
        assert!(response.rows.is_empty());
        assert!(slot.lock().unwrap().is_none());

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("roster.sqlite3");
        let config = RosterConfig {
            db_path: db_path.clone(),
            ..RosterConfig::default()
        };
        let response = with_session_in(&slot, || config, |session| session.snapshot());
        assert!(response.ok);
        assert!(slot.lock().unwrap().is_some());
        assert!(db_path.exists());
    }
}
