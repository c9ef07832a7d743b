//! Student domain model.
//!
//! # Responsibility
//! - Define the fixed-shape record stored in the roster.
//! - Carry raw form input separately from committed records.
//!
//! # Invariants
//! - `student_id` is unique across one roster (exact, case-sensitive match).
//! - Committed records hold trimmed, validated values only.
//! - Persisted JSON uses the `id` key for `student_id`.

use serde::{Deserialize, Serialize};

/// Byte order mark; browser form trimming treats it as whitespace.
const BYTE_ORDER_MARK: char = '\u{FEFF}';

fn trim_input(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .to_string()
}

/// One committed student entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Display name (letters and whitespace).
    pub name: String,
    /// Unique numeric identifier, kept as text.
    #[serde(rename = "id", alias = "identifier")]
    pub student_id: String,
    pub email: String,
    /// Phone number, digits only.
    pub contact: String,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            email: email.into(),
            contact: contact.into(),
        }
    }
}

/// Raw form input as typed by the user.
///
/// Values are untrimmed; call [`StudentFields::trimmed`] before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub contact: String,
}

impl StudentFields {
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        email: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            email: email.into(),
            contact: contact.into(),
        }
    }

    /// Returns a copy with leading/trailing whitespace (and U+FEFF) removed
    /// from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: trim_input(&self.name),
            student_id: trim_input(&self.student_id),
            email: trim_input(&self.email),
            contact: trim_input(&self.contact),
        }
    }

    /// Returns whether every field is empty (a cleared form).
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.student_id.is_empty()
            && self.email.is_empty()
            && self.contact.is_empty()
    }

    /// Converts the fields into a record without validating them.
    ///
    /// Callers are expected to run [`crate::validate_fields`] first.
    pub fn into_record(self) -> StudentRecord {
        StudentRecord {
            name: self.name,
            student_id: self.student_id,
            email: self.email,
            contact: self.contact,
        }
    }
}

impl From<&StudentRecord> for StudentFields {
    fn from(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            student_id: record.student_id.clone(),
            email: record.email.clone(),
            contact: record.contact.clone(),
        }
    }
}
