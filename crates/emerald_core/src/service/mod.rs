//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and storage into roster-level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod roster_service;
