//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose roster use-cases to Dart via FRB as simple envelopes.
//! - Own the one in-memory roster for the process.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The store is read once; later calls are served from the session roster.
//! - Storage failures degrade to seed data or `persisted=false`, never errors.

use emerald_core::db::open_db;
use emerald_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ClientRecord, ClientRoster, ClientValidationErrors, KeyValueRepository, LoadSource,
    MemoryKeyValueRepository, PersistOutcome, RepoError, RepoResult, SqliteKeyValueRepository,
};
use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

const ROSTER_DB_FILE_NAME: &str = "emerald_cove.sqlite3";
const ROSTER_DB_PATH_ENV: &str = "EMERALD_COVE_DB_PATH";
static SESSION: OnceLock<Mutex<RosterSession<SessionStore>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One client table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientItem {
    pub name: String,
    pub email: String,
}

/// Roster snapshot for rendering the table and total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterResponse {
    /// Clients in insertion order.
    pub clients: Vec<ClientItem>,
    /// Always equal to `clients.len()`.
    pub total_clients: u32,
    /// `store` when loaded, otherwise the fallback reason code.
    pub source: String,
    /// Human-readable diagnostics.
    pub message: String,
}

/// Result envelope for the add-client dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddClientResponse {
    /// Whether the client was appended.
    pub ok: bool,
    /// Message to show next to the name input.
    pub name_error: Option<String>,
    /// Message to show next to the email input.
    pub email_error: Option<String>,
    /// Whether the roster reached durable storage.
    pub persisted: bool,
    /// Clients after the call, in insertion order.
    pub clients: Vec<ClientItem>,
    /// Total clients after the call.
    pub total_clients: u32,
    /// Human-readable diagnostics.
    pub message: String,
}

/// Returns the session roster, loading it from storage on first use.
///
/// # FFI contract
/// - Sync call; the first call opens the store, later calls read memory.
/// - Never fails; store errors fall back to the seed set.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_load() -> RosterResponse {
    with_session(|session| session.snapshot())
}

/// Validates and appends one client, then persists the roster.
///
/// # FFI contract
/// - Sync call against the session roster.
/// - Validation errors are reported per field; both may be set.
/// - A failed write still returns `ok=true` with `persisted=false`, and the
///   client stays visible to later calls in this process.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_add_client(name: String, email: String) -> AddClientResponse {
    with_session(|session| session.add_client(name.as_str(), email.as_str()))
}

/// Store behind the process-wide session.
enum SessionStore {
    Sqlite(SqliteKeyValueRepository<Connection>),
    /// Database could not be opened; every read and write reports unavailable.
    Offline(MemoryKeyValueRepository),
}

impl KeyValueRepository for SessionStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        match self {
            Self::Sqlite(repo) => repo.get(key),
            Self::Offline(repo) => repo.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        match self {
            Self::Sqlite(repo) => repo.set(key, value),
            Self::Offline(repo) => repo.set(key, value),
        }
    }
}

/// In-memory roster shared by every FFI call in the process.
struct RosterSession<R: KeyValueRepository> {
    roster: ClientRoster<R>,
}

impl<R: KeyValueRepository> RosterSession<R> {
    fn new(repo: R) -> Self {
        Self {
            roster: ClientRoster::load(repo),
        }
    }

    fn snapshot(&self) -> RosterResponse {
        let roster = &self.roster;
        let message = match roster.load_source() {
            LoadSource::Loaded => format!("Loaded {} client(s).", roster.count()),
            LoadSource::Defaulted(reason) => format!("Using default clients ({reason})."),
        };
        RosterResponse {
            clients: to_items(roster.clients()),
            total_clients: count_u32(roster.count()),
            source: source_label(roster.load_source()),
            message,
        }
    }

    fn add_client(&mut self, name: &str, email: &str) -> AddClientResponse {
        match self.roster.add_client(name, email) {
            Ok(persisted) => {
                let message = match &persisted {
                    PersistOutcome::Saved => "Client added.".to_string(),
                    PersistOutcome::Failed(reason) => {
                        format!("Client added for this session only: {reason}")
                    }
                };
                AddClientResponse {
                    ok: true,
                    name_error: None,
                    email_error: None,
                    persisted: persisted.is_saved(),
                    clients: to_items(self.roster.clients()),
                    total_clients: count_u32(self.roster.count()),
                    message,
                }
            }
            Err(errors) => rejected(errors, self.roster.clients()),
        }
    }
}

fn rejected(errors: ClientValidationErrors, clients: &[ClientRecord]) -> AddClientResponse {
    AddClientResponse {
        ok: false,
        name_error: errors.name.map(|err| err.to_string()),
        email_error: errors.email.map(|err| err.to_string()),
        persisted: false,
        clients: to_items(clients),
        total_clients: count_u32(clients.len()),
        message: format!("Client not added: {errors}"),
    }
}

fn with_session<T>(f: impl FnOnce(&mut RosterSession<SessionStore>) -> T) -> T {
    let session = SESSION.get_or_init(|| {
        Mutex::new(RosterSession::new(open_session_store(
            &resolve_roster_db_path(),
        )))
    });
    // Roster mutation is a single push; a poisoned guard is still consistent.
    let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn open_session_store(path: &Path) -> SessionStore {
    let conn = match open_db(path) {
        Ok(conn) => conn,
        Err(err) => return offline_store("db_open_failed", &err),
    };
    match SqliteKeyValueRepository::try_new(conn) {
        Ok(repo) => SessionStore::Sqlite(repo),
        Err(err) => offline_store("repo_init_failed", &err),
    }
}

fn offline_store(error_code: &str, err: &RepoError) -> SessionStore {
    warn!(
        "event=ffi_session module=ffi status=degraded error_code={error_code} error={err}"
    );
    SessionStore::Offline(MemoryKeyValueRepository::unavailable())
}

fn resolve_roster_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(ROSTER_DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(ROSTER_DB_FILE_NAME)
}

fn source_label(source: &LoadSource) -> String {
    match source {
        LoadSource::Loaded => "store".to_string(),
        LoadSource::Defaulted(reason) => format!("default:{}", reason.code()),
    }
}

fn to_items(clients: &[ClientRecord]) -> Vec<ClientItem> {
    clients
        .iter()
        .map(|record| ClientItem {
            name: record.name().to_string(),
            email: record.email().to_string(),
        })
        .collect()
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
