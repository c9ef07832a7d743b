//! Form field validation rules.
//!
//! # Responsibility
//! - Check trimmed form input against per-field format rules.
//! - Produce exactly one user-facing message per failed submission.
//!
//! # Invariants
//! - The empty check runs on all fields before any format rule.
//! - Format rules run in fixed order: name, student id, email, contact.
//! - Validation is pure; no state is read or written.

use crate::model::student::StudentFields;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// `\s` here excludes U+FEFF, which browsers count as whitespace.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s\x{FEFF}]{2,50}$").expect("valid name regex"));
// ASCII digits only; `\d` in `regex` is Unicode-aware.
static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid student id regex"));
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10,}$").expect("valid contact regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("valid email regex")
});

/// Form field identity, used to report which input failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    StudentId,
    Email,
    Contact,
}

impl StudentField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::StudentId => "student_id",
            Self::Email => "email",
            Self::Contact => "contact",
        }
    }
}

/// First failing validation rule for one submission.
///
/// `Display` renders the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one field is empty; carries the first empty one.
    MissingField(StudentField),
    InvalidName,
    InvalidStudentId,
    InvalidEmail,
    InvalidContact,
}

impl ValidationError {
    /// Field the failure is attributed to.
    pub fn field(self) -> StudentField {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidName => StudentField::Name,
            Self::InvalidStudentId => StudentField::StudentId,
            Self::InvalidEmail => StudentField::Email,
            Self::InvalidContact => StudentField::Contact,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "Please fill in all fields."),
            Self::InvalidName => write!(f, "Name must be letters and spaces only (2-50 chars)."),
            Self::InvalidStudentId => write!(f, "Student ID must contain digits only."),
            Self::InvalidEmail => write!(f, "Please enter a valid email address."),
            Self::InvalidContact => write!(
                f,
                "Contact number must be digits only and at least 10 digits."
            ),
        }
    }
}

impl Error for ValidationError {}

/// Letters and whitespace only, 2 to 50 characters.
pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

/// One or more digits, nothing else.
pub fn is_valid_student_id(value: &str) -> bool {
    STUDENT_ID_RE.is_match(value)
}

/// Ten or more digits, nothing else.
pub fn is_valid_contact(value: &str) -> bool {
    CONTACT_RE.is_match(value)
}

/// `local@domain.tld` with no whitespace and a dot in the domain part.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validates already-trimmed fields, stopping at the first failure.
pub fn validate_fields(fields: &StudentFields) -> Result<(), ValidationError> {
    let required = [
        (StudentField::Name, fields.name.as_str()),
        (StudentField::StudentId, fields.student_id.as_str()),
        (StudentField::Email, fields.email.as_str()),
        (StudentField::Contact, fields.contact.as_str()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if !is_valid_name(&fields.name) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_student_id(&fields.student_id) {
        return Err(ValidationError::InvalidStudentId);
    }
    if !is_valid_email(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_contact(&fields.contact) {
        return Err(ValidationError::InvalidContact);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        is_valid_email, is_valid_name, is_valid_student_id, validate_fields, StudentField,
        ValidationError,
    };
    use crate::model::student::StudentFields;

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert!(is_valid_name("Ann\u{FEFF}Lee"));
        assert!(!is_valid_email("a\u{FEFF}b@c.com"));
        assert!(is_valid_email("ab@c.com"));
    }

    #[test]
    fn student_id_rejects_non_ascii_digits() {
        assert!(is_valid_student_id("42"));
        assert!(!is_valid_student_id("\u{0664}\u{0662}"));
    }

    #[test]
    fn empty_check_reports_first_empty_field() {
        let fields = StudentFields::new("Ann", "", "a@b.com", "");
        assert_eq!(
            validate_fields(&fields),
            Err(ValidationError::MissingField(StudentField::StudentId))
        );
    }

    #[test]
    fn empty_check_precedes_format_rules() {
        // Bad name and an empty contact: the empty check wins.
        let fields = StudentFields::new("A", "1", "a@b.com", "");
        let err = validate_fields(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }
}
