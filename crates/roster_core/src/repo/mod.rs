//! Record store layer.
//!
//! # Responsibility
//! - Hold the ordered roster and its uniqueness rules.
//! - Keep durable storage in sync after every mutation.

pub mod roster_store;
