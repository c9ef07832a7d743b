//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and store mutations behind typed commands.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod roster_controller;
