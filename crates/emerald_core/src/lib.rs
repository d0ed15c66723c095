//! Core domain logic for the Emerald Cove client dashboard.
//! This crate is the single source of truth for the client roster.

pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dashboard::state::{AddClientForm, DashboardState, NavTab, SubmitOutcome};
pub use dashboard::view::{render_dashboard, ClientRowView, DashboardView};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{
    is_valid_email, validate_client, ClientField, ClientRecord, ClientValidationError,
    ClientValidationErrors,
};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult,
    SqliteKeyValueRepository,
};
pub use service::roster_service::{
    load_clients, seed_clients, ClientRoster, DefaultReason, LoadOutcome, LoadSource,
    PersistOutcome, CLIENTS_STORE_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
