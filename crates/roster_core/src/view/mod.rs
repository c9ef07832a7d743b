//! Presentation layer.
//!
//! # Responsibility
//! - Project roster state into technology-neutral table rows.
//! - Model transient notifications and table viewport sizing.
//!
//! # Invariants
//! - Presentation never mutates the record store; row controls only produce
//!   commands for the controller.

pub mod layout;
pub mod notification;
pub mod table;
