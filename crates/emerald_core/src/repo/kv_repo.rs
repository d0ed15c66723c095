//! Key-value store contracts and implementations.
//!
//! # Responsibility
//! - Provide the `get`/`set` contract the roster persists through.
//! - Keep SQL details inside the core persistence boundary.
//! - Offer an in-memory store that can emulate quota and outage failures.
//!
//! # Invariants
//! - `set` overwrites any prior value for the key.
//! - Values are opaque text; this layer never parses them.

use rusqlite::{params, Connection, OptionalExtension};
use std::borrow::Borrow;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by key-value store operations.
#[derive(Debug)]
pub enum RepoError {
    /// SQLite transport failure.
    Sqlite(rusqlite::Error),
    /// Database file was stamped by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Write rejected because the store would exceed its byte budget.
    QuotaExceeded { limit_bytes: usize, required_bytes: usize },
    /// Store is not reachable (disabled storage, closed backend).
    Unavailable(String),
    /// Connection is missing a table this repository depends on.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::QuotaExceeded {
                limit_bytes,
                required_bytes,
            } => write!(
                f,
                "store quota exceeded: {required_bytes} bytes required, limit is {limit_bytes}"
            ),
            Self::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "store connection is missing table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string key-value store.
pub trait KeyValueRepository {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<R: KeyValueRepository + ?Sized> KeyValueRepository for &R {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed key-value store over the `kv_store` table.
///
/// `C` is either a borrowed `&Connection` or an owned `Connection`, so a
/// store can live as long as the roster that writes through it.
pub struct SqliteKeyValueRepository<C: Borrow<Connection>> {
    conn: C,
}

impl<C: Borrow<Connection>> SqliteKeyValueRepository<C> {
    /// Constructs a repository from a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - Returns `MissingRequiredTable` when `kv_store` does not exist.
    pub fn try_new(conn: C) -> RepoResult<Self> {
        if !table_exists(conn.borrow(), "kv_store")? {
            return Err(RepoError::MissingRequiredTable("kv_store"));
        }
        Ok(Self { conn })
    }
}

impl<C: Borrow<Connection>> KeyValueRepository for SqliteKeyValueRepository<C> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let conn: &Connection = self.conn.borrow();
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let conn: &Connection = self.conn.borrow();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory key-value store with optional failure emulation.
///
/// Mirrors browser local storage: a byte budget measured over keys plus
/// values, and a switch that makes every call fail as if storage were
/// disabled.
#[derive(Debug, Default)]
pub struct MemoryKeyValueRepository {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    unavailable: Cell<bool>,
}

impl MemoryKeyValueRepository {
    /// Creates an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Creates a store whose every operation fails.
    pub fn unavailable() -> Self {
        let repo = Self::default();
        repo.set_available(false);
        repo
    }

    /// Toggles outage emulation.
    pub fn set_available(&self, available: bool) {
        self.unavailable.set(!available);
    }

    /// Writes a raw value bypassing quota and outage checks.
    ///
    /// Lets callers seed corrupted or foreign data.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn ensure_available(&self) -> RepoResult<()> {
        if self.unavailable.get() {
            return Err(RepoError::Unavailable(
                "in-memory store is disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueRepository for MemoryKeyValueRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.ensure_available()?;
        if let Some(limit_bytes) = self.quota_bytes {
            let required_bytes = self.used_bytes_excluding(key) + key.len() + value.len();
            if required_bytes > limit_bytes {
                return Err(RepoError::QuotaExceeded {
                    limit_bytes,
                    required_bytes,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
