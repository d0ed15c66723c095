//! SQLite backing for the durable key-value store.
//!
//! # Responsibility
//! - Open file or in-memory connections ready for `SqliteKeyValueRepository`.
//!
//! # Invariants
//! - A returned connection has the `kv_store` table at [`STORE_SCHEMA_VERSION`].
//! - Stored values are never rewritten by schema setup.

mod open;

pub use open::{open_db, open_db_in_memory, STORE_SCHEMA_VERSION};
