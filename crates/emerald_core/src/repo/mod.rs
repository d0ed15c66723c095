//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract the roster persists through.
//! - Isolate SQLite query details from roster orchestration.
//!
//! # Invariants
//! - Repository APIs return transport errors; they never interpret values.

pub mod kv_repo;
