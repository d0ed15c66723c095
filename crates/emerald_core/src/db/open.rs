//! Connection bootstrap for the client store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Create the `kv_store` table on first use and stamp its version.
//!
//! # Invariants
//! - Returned connections have a busy timeout and a current `kv_store` table.
//! - A file stamped by a newer build is refused instead of being written to.

use crate::repo::kv_repo::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::{Duration, Instant};

/// `PRAGMA user_version` written once the `kv_store` table exists.
pub const STORE_SCHEMA_VERSION: u32 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const KV_STORE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT 0
);";

/// Opens (or creates) a store database file.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> RepoResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory store database.
///
/// Used by tests and by callers that want a session-only roster.
pub fn open_db_in_memory() -> RepoResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> RepoResult<Connection> {
    let started_at = Instant::now();

    let result = connect()
        .map_err(RepoError::from)
        .and_then(|mut conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            ensure_store_schema(&mut conn)?;
            Ok(conn)
        });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
    result
}

fn ensure_store_schema(conn: &mut Connection) -> RepoResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found == STORE_SCHEMA_VERSION {
        return Ok(());
    }
    if found > STORE_SCHEMA_VERSION {
        return Err(RepoError::UnsupportedSchemaVersion {
            found,
            supported: STORE_SCHEMA_VERSION,
        });
    }

    // Immediate lock so two processes opening a fresh file do not race.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(KV_STORE_TABLE_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {STORE_SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!("event=db_schema module=db status=ok from_version={found} to_version={STORE_SCHEMA_VERSION}");
    Ok(())
}
