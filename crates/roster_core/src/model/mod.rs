//! Roster domain model.
//!
//! # Responsibility
//! - Define the fixed-shape student record and raw form input.
//! - Own the field validation rules applied at the submission boundary.
//!
//! # Invariants
//! - Records are validated once, on submission, never on read.

pub mod student;
pub mod validation;
