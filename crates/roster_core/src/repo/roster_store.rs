//! In-memory roster with write-through persistence.
//!
//! # Responsibility
//! - Own the ordered record collection (single source of truth).
//! - Enforce student id uniqueness on add and update.
//! - Mirror every successful mutation to [`RosterStorage`].
//!
//! # Invariants
//! - Order is insertion order; update keeps position; delete shifts later
//!   records up by one.
//! - A failed save rolls the in-memory mutation back before returning.
//! - Records are not revalidated here; callers validate on submission.

use crate::model::student::StudentRecord;
use crate::storage::{KeyValueStore, RosterStorage, StorageError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Rejections and failures from roster mutations.
#[derive(Debug)]
pub enum StoreError {
    /// Add with a student id that already exists.
    DuplicateStudentId { student_id: String, existing_index: usize },
    /// Update would reuse a student id owned by another row.
    StudentIdConflict { student_id: String, existing_index: usize },
    /// Update targeted a row that does not exist.
    IndexOutOfRange { index: usize, len: usize },
    /// Persistence write failed; in-memory state was restored.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateStudentId {
                student_id,
                existing_index,
            } => write!(
                f,
                "student id `{student_id}` already exists at index {existing_index}"
            ),
            Self::StudentIdConflict {
                student_id,
                existing_index,
            } => write!(
                f,
                "student id `{student_id}` belongs to another record at index {existing_index}"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for roster of {len}")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Ordered student collection synchronized with durable storage.
pub struct RosterStore<S: KeyValueStore> {
    records: Vec<StudentRecord>,
    storage: RosterStorage<S>,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Loads the persisted roster. Corrupt or missing data starts empty.
    pub fn open(storage: RosterStorage<S>) -> Self {
        let records = storage.load();
        info!(
            "event=store_open module=store status=ok count={}",
            records.len()
        );
        Self { records, storage }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }

    pub fn storage(&self) -> &RosterStorage<S> {
        &self.storage
    }

    /// Returns the index of the first record with `student_id`.
    pub fn find_by_student_id(&self, student_id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.student_id == student_id)
    }

    /// Appends a record and returns its index.
    pub fn add(&mut self, record: StudentRecord) -> StoreResult<usize> {
        if let Some(existing_index) = self.find_by_student_id(&record.student_id) {
            info!(
                "event=student_add module=store status=rejected reason=duplicate_id existing_index={existing_index}"
            );
            return Err(StoreError::DuplicateStudentId {
                student_id: record.student_id,
                existing_index,
            });
        }

        self.records.push(record);
        let index = self.records.len() - 1;
        if let Err(err) = self.persist("student_add") {
            self.records.pop();
            return Err(err);
        }

        info!("event=student_add module=store status=ok index={index}");
        Ok(index)
    }

    /// Replaces the record at `index` in place.
    pub fn update(&mut self, index: usize, record: StudentRecord) -> StoreResult<()> {
        let len = self.records.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        if let Some(existing_index) = self
            .records
            .iter()
            .enumerate()
            .find(|(i, existing)| *i != index && existing.student_id == record.student_id)
            .map(|(i, _)| i)
        {
            info!(
                "event=student_update module=store status=rejected reason=id_conflict index={index} existing_index={existing_index}"
            );
            return Err(StoreError::StudentIdConflict {
                student_id: record.student_id,
                existing_index,
            });
        }

        let previous = std::mem::replace(&mut self.records[index], record);
        if let Err(err) = self.persist("student_update") {
            self.records[index] = previous;
            return Err(err);
        }

        info!("event=student_update module=store status=ok index={index}");
        Ok(())
    }

    /// Removes the record at `index`.
    ///
    /// Returns `Ok(None)` without touching storage when `index` is out of range.
    pub fn delete(&mut self, index: usize) -> StoreResult<Option<StudentRecord>> {
        if index >= self.records.len() {
            return Ok(None);
        }

        let removed = self.records.remove(index);
        if let Err(err) = self.persist("student_delete") {
            self.records.insert(index, removed);
            return Err(err);
        }

        info!("event=student_delete module=store status=ok index={index}");
        Ok(Some(removed))
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        self.storage.save(&self.records).map_err(|err| {
            error!(
                "event={event} module=store status=error error_code=save_failed error={err}"
            );
            StoreError::Storage(err)
        })
    }
}
