//! Client roster use-case service.
//!
//! # Responsibility
//! - Hold the canonical, ordered list of clients for one session.
//! - Restore it from the key-value store, falling back to the seed set.
//! - Validate additions and persist after every successful append.
//!
//! # Invariants
//! - The roster only grows; there is no edit or delete path.
//! - `count()` is always the length of `clients()`.
//! - Load and persist failures never escape; they are reported as values.
//! - Client names and emails never reach the logs.

use crate::model::client::{validate_client, ClientRecord, ClientValidationErrors};
use crate::repo::kv_repo::KeyValueRepository;
use log::{info, warn};
use serde_json::error::Category;
use std::fmt::{Display, Formatter};

/// Store key holding the serialized roster.
pub const CLIENTS_STORE_KEY: &str = "emerald_cove.clients";

const SEED_CLIENTS: [(&str, &str); 4] = [
    ("John Doe", "john.doe@example.com"),
    ("Jane Smith", "jane.smith@example.com"),
    ("Joe Bloggs", "joe.bloggs@example.com"),
    ("Sarah Johnson", "sarah.johnson@example.com"),
];

/// Returns the default roster used when nothing valid is stored.
pub fn seed_clients() -> Vec<ClientRecord> {
    SEED_CLIENTS
        .iter()
        .map(|(name, email)| ClientRecord::from_trusted(name, email))
        .collect()
}

/// Why a load fell back to the seed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// Nothing stored under the roster key.
    Missing,
    /// The store rejected the read.
    StoreUnavailable(String),
    /// A value exists but is not a JSON list of `{name, email}` objects.
    ///
    /// Only the failure position is kept; the decoder message quotes stored
    /// values and must not reach logs.
    Malformed {
        category: &'static str,
        line: usize,
        column: usize,
    },
}

impl DefaultReason {
    /// Stable machine-readable code for FFI and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Malformed { .. } => "malformed",
        }
    }
}

impl Display for DefaultReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no stored roster"),
            Self::StoreUnavailable(reason) => write!(f, "store unavailable: {reason}"),
            Self::Malformed {
                category,
                line,
                column,
            } => write!(
                f,
                "stored roster is malformed ({category} error at line {line} column {column})"
            ),
        }
    }
}

/// Where the in-memory roster came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the store.
    Loaded,
    /// Seeded because the store had nothing usable.
    Defaulted(DefaultReason),
}

impl LoadSource {
    /// Returns `true` when the seed set was used.
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Result of reading the roster from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Usable clients, never absent.
    pub clients: Vec<ClientRecord>,
    /// Whether `clients` came from the store or the seed set.
    pub source: LoadSource,
}

/// Result of writing the roster to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Full roster written.
    Saved,
    /// Write failed; the in-memory roster is still authoritative.
    Failed(String),
}

impl PersistOutcome {
    /// Returns `true` when the write reached the store.
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Reads the roster under [`CLIENTS_STORE_KEY`], falling back to the seed set.
///
/// Stored records are taken as-is; they are not re-validated.
pub fn load_clients<R: KeyValueRepository>(repo: &R) -> LoadOutcome {
    let source = match repo.get(CLIENTS_STORE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<ClientRecord>>(&raw) {
            Ok(clients) => {
                info!(
                    "event=roster_load module=service status=ok source=store count={}",
                    clients.len()
                );
                return LoadOutcome {
                    clients,
                    source: LoadSource::Loaded,
                };
            }
            Err(err) => malformed_reason(&err),
        },
        Ok(None) => DefaultReason::Missing,
        Err(err) => DefaultReason::StoreUnavailable(err.to_string()),
    };

    let clients = seed_clients();
    match &source {
        DefaultReason::Missing => info!(
            "event=roster_load module=service status=ok source=seed reason={} count={}",
            source.code(),
            clients.len()
        ),
        _ => warn!(
            "event=roster_load module=service status=degraded source=seed reason={} count={} error={}",
            source.code(),
            clients.len(),
            source
        ),
    }

    LoadOutcome {
        clients,
        source: LoadSource::Defaulted(source),
    }
}

fn malformed_reason(err: &serde_json::Error) -> DefaultReason {
    let category = match err.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "data",
        Category::Eof => "eof",
    };
    DefaultReason::Malformed {
        category,
        line: err.line(),
        column: err.column(),
    }
}

/// Session-scoped single source of truth for the client list.
pub struct ClientRoster<R: KeyValueRepository> {
    repo: R,
    clients: Vec<ClientRecord>,
    source: LoadSource,
}

impl<R: KeyValueRepository> ClientRoster<R> {
    /// Restores the roster from `repo`, seeding it when nothing usable is stored.
    ///
    /// Never fails. Use [`ClientRoster::load_source`] to tell apart a stored
    /// roster from the seed fallback.
    pub fn load(repo: R) -> Self {
        let LoadOutcome { clients, source } = load_clients(&repo);
        Self {
            repo,
            clients,
            source,
        }
    }

    /// Clients in insertion order.
    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    /// Number of clients currently held.
    pub fn count(&self) -> usize {
        self.clients.len()
    }

    /// How this roster was initialized.
    pub fn load_source(&self) -> &LoadSource {
        &self.source
    }

    /// Appends a validated record and persists the whole roster.
    ///
    /// Duplicates are accepted. The record stays in memory even when the
    /// write fails.
    pub fn append(&mut self, record: ClientRecord) -> PersistOutcome {
        self.clients.push(record);
        info!(
            "event=roster_append module=service status=ok count={}",
            self.clients.len()
        );
        self.persist()
    }

    /// Validates form input and appends it on success.
    ///
    /// # Errors
    /// - Returns field errors and leaves the roster untouched when the input
    ///   is invalid.
    pub fn add_client(
        &mut self,
        name: &str,
        email: &str,
    ) -> Result<PersistOutcome, ClientValidationErrors> {
        match validate_client(name, email) {
            Ok(record) => Ok(self.append(record)),
            Err(errors) => {
                let codes = errors
                    .iter()
                    .map(|err| err.code())
                    .collect::<Vec<_>>()
                    .join(",");
                info!("event=roster_append module=service status=rejected errors={codes}");
                Err(errors)
            }
        }
    }

    /// Serializes the full roster and overwrites the stored value.
    ///
    /// Failures are logged and returned, never raised.
    pub fn persist(&self) -> PersistOutcome {
        let payload = match serde_json::to_string(&self.clients) {
            Ok(payload) => payload,
            Err(err) => return self.persist_failed(err.to_string()),
        };

        match self.repo.set(CLIENTS_STORE_KEY, &payload) {
            Ok(()) => {
                info!(
                    "event=roster_persist module=service status=ok count={} bytes={}",
                    self.clients.len(),
                    payload.len()
                );
                PersistOutcome::Saved
            }
            Err(err) => self.persist_failed(err.to_string()),
        }
    }

    fn persist_failed(&self, reason: String) -> PersistOutcome {
        warn!(
            "event=roster_persist module=service status=error count={} error={}",
            self.clients.len(),
            reason
        );
        PersistOutcome::Failed(reason)
    }
}
