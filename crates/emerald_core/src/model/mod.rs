//! Client-facing domain model.
//!
//! # Responsibility
//! - Define the records the dashboard renders and the roster stores.
//! - Own input validation for the add-client form.
//!
//! # Invariants
//! - Records built through validation are trimmed and well-formed.

pub mod client;
