//! Roster form controller.
//!
//! # Responsibility
//! - Own the add/edit mode state and the form draft.
//! - Turn typed UI commands into validation, store mutation, re-render and
//!   user notifications.
//!
//! # Invariants
//! - Mode is `Add` or `Edit(i)` with `i < store.len()`.
//! - Validation and uniqueness rejections never mutate the store.
//! - Out-of-range row indexes are silently ignored.
//! - Every store mutation is followed by exactly one `render` call.

use crate::model::student::{StudentFields, StudentRecord};
use crate::model::validation::{validate_fields, ValidationError};
use crate::repo::roster_store::{RosterStore, StoreError, StoreResult};
use crate::storage::KeyValueStore;
use crate::view::table::{render_table, TableView};
use log::{debug, error};

pub const ADD_LABEL: &str = "Add Student";
pub const UPDATE_LABEL: &str = "Update Student";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";
pub const EDIT_STARTED_MESSAGE: &str = "Editing mode: update values and press \"Update Student\"";
pub const ADDED_MESSAGE: &str = "Student added successfully.";
pub const UPDATED_MESSAGE: &str = "Student updated successfully.";
pub const DELETED_MESSAGE: &str = "Student deleted";
pub const DUPLICATE_ID_MESSAGE: &str = "A student with this Student ID already exists.";
pub const CONFLICTING_ID_MESSAGE: &str = "Another student with this Student ID already exists.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save students.";

/// Form mode (the edit cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Add,
    /// Editing the record at this index.
    Edit(usize),
}

impl FormMode {
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Add => ADD_LABEL,
            Self::Edit(_) => UPDATE_LABEL,
        }
    }

    pub fn edit_index(self) -> Option<usize> {
        match self {
            Self::Add => None,
            Self::Edit(index) => Some(index),
        }
    }
}

/// Typed UI event consumed by [`RosterController::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterCommand {
    Edit(usize),
    Delete(usize),
    Submit(StudentFields),
    /// Explicit cancel: clear the form and return to add mode.
    Reset,
}

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Validation(ValidationError),
    DuplicateStudentId { existing_index: usize },
    StudentIdConflict { existing_index: usize },
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Out-of-range index; nothing happened.
    Ignored,
    EditStarted(usize),
    Added(usize),
    Updated(usize),
    Deleted(usize),
    /// User declined the delete confirmation.
    DeleteDeclined,
    Rejected(RejectReason),
    Reset,
}

/// UI collaborator driven by the controller.
pub trait RosterView {
    /// Shows a short status message.
    fn notify(&mut self, message: &str);
    /// Asks the user to confirm; `false` cancels the action.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Replaces the displayed rows.
    fn render(&mut self, table: &TableView);
}

/// Form state machine over a [`RosterStore`].
pub struct RosterController<S: KeyValueStore> {
    store: RosterStore<S>,
    mode: FormMode,
    form: StudentFields,
}

impl<S: KeyValueStore> RosterController<S> {
    pub fn new(store: RosterStore<S>) -> Self {
        Self {
            store,
            mode: FormMode::Add,
            form: StudentFields::default(),
        }
    }

    pub fn store(&self) -> &RosterStore<S> {
        &self.store
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current form draft as the UI should display it.
    pub fn form(&self) -> &StudentFields {
        &self.form
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    pub fn table(&self) -> TableView {
        render_table(self.store.records())
    }

    /// Renders the initial table.
    pub fn start(&self, view: &mut dyn RosterView) {
        view.render(&self.table());
    }

    /// Runs one command to completion.
    ///
    /// Only storage write failures are returned as errors; every other
    /// failure is reported through `view.notify` and the outcome.
    pub fn dispatch(
        &mut self,
        command: RosterCommand,
        view: &mut dyn RosterView,
    ) -> StoreResult<CommandOutcome> {
        match command {
            RosterCommand::Edit(index) => Ok(self.start_edit(index, view)),
            RosterCommand::Delete(index) => self.delete(index, view),
            RosterCommand::Submit(fields) => self.submit(fields, view),
            RosterCommand::Reset => {
                self.reset_form();
                Ok(CommandOutcome::Reset)
            }
        }
    }

    fn start_edit(&mut self, index: usize, view: &mut dyn RosterView) -> CommandOutcome {
        let Some(record) = self.store.get(index) else {
            debug!("event=form_edit module=controller status=ignored index={index}");
            return CommandOutcome::Ignored;
        };

        self.form = StudentFields::from(record);
        self.mode = FormMode::Edit(index);
        view.notify(EDIT_STARTED_MESSAGE);
        CommandOutcome::EditStarted(index)
    }

    fn delete(&mut self, index: usize, view: &mut dyn RosterView) -> StoreResult<CommandOutcome> {
        if index >= self.store.len() {
            debug!("event=form_delete module=controller status=ignored index={index}");
            return Ok(CommandOutcome::Ignored);
        }
        if !view.confirm(DELETE_PROMPT) {
            return Ok(CommandOutcome::DeleteDeclined);
        }

        if self.commit(view, |store| store.delete(index))?.is_none() {
            return Ok(CommandOutcome::Ignored);
        }
        view.render(&self.table());

        match self.mode {
            FormMode::Edit(current) if current == index => self.reset_form(),
            FormMode::Edit(current) if current > index => self.mode = FormMode::Edit(current - 1),
            _ => {}
        }

        view.notify(DELETED_MESSAGE);
        Ok(CommandOutcome::Deleted(index))
    }

    fn submit(
        &mut self,
        fields: StudentFields,
        view: &mut dyn RosterView,
    ) -> StoreResult<CommandOutcome> {
        let trimmed = fields.trimmed();
        self.form = fields;

        if let Err(err) = validate_fields(&trimmed) {
            debug!(
                "event=form_submit module=controller status=rejected reason=validation field={}",
                err.field().as_str()
            );
            view.notify(&err.to_string());
            return Ok(CommandOutcome::Rejected(RejectReason::Validation(err)));
        }
        let record: StudentRecord = trimmed.into_record();

        match self.mode {
            FormMode::Add => match self.commit(view, |store| store.add(record)) {
                Ok(index) => {
                    view.render(&self.table());
                    self.form = StudentFields::default();
                    view.notify(ADDED_MESSAGE);
                    Ok(CommandOutcome::Added(index))
                }
                Err(StoreError::DuplicateStudentId { existing_index, .. }) => {
                    view.notify(DUPLICATE_ID_MESSAGE);
                    Ok(CommandOutcome::Rejected(RejectReason::DuplicateStudentId {
                        existing_index,
                    }))
                }
                Err(err) => Err(err),
            },
            FormMode::Edit(index) => match self.commit(view, |store| store.update(index, record)) {
                Ok(()) => {
                    view.render(&self.table());
                    self.reset_form();
                    view.notify(UPDATED_MESSAGE);
                    Ok(CommandOutcome::Updated(index))
                }
                Err(StoreError::StudentIdConflict { existing_index, .. }) => {
                    view.notify(CONFLICTING_ID_MESSAGE);
                    Ok(CommandOutcome::Rejected(RejectReason::StudentIdConflict {
                        existing_index,
                    }))
                }
                Err(StoreError::IndexOutOfRange { .. }) => {
                    // Cursor no longer points at a row; fall back to add mode.
                    self.mode = FormMode::Add;
                    Ok(CommandOutcome::Ignored)
                }
                Err(err) => Err(err),
            },
        }
    }

    /// Runs a store mutation, reporting storage failures to the user.
    fn commit<T>(
        &mut self,
        view: &mut dyn RosterView,
        mutation: impl FnOnce(&mut RosterStore<S>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let result = mutation(&mut self.store);
        if let Err(err @ StoreError::Storage(_)) = &result {
            error!("event=form_commit module=controller status=error error={err}");
            view.notify(SAVE_FAILED_MESSAGE);
        }
        result
    }

    fn reset_form(&mut self) {
        self.form = StudentFields::default();
        self.mode = FormMode::Add;
    }
}
