//! Caller-owned dashboard UI state.
//!
//! # Responsibility
//! - Track the active sidebar tab and the add-client dialog.
//! - Route dialog submission through roster validation.
//!
//! # Invariants
//! - Closing the dialog discards drafts and errors without touching the roster.
//! - A rejected submission keeps the dialog open with both field errors set.

use crate::model::client::ClientValidationErrors;
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::roster_service::{ClientRoster, PersistOutcome};

/// Sidebar navigation entries, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavTab {
    #[default]
    Dashboard,
    Clients,
    Projects,
    Settings,
}

impl NavTab {
    /// All tabs in sidebar order.
    pub const ALL: [NavTab; 4] = [
        NavTab::Dashboard,
        NavTab::Clients,
        NavTab::Projects,
        NavTab::Settings,
    ];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::Projects => "Projects",
            Self::Settings => "Settings",
        }
    }
}

/// Draft state of the add-client dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddClientForm {
    open: bool,
    name_input: String,
    email_input: String,
    errors: ClientValidationErrors,
}

impl AddClientForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Raw name text as typed.
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Raw email text as typed.
    pub fn email_input(&self) -> &str {
        &self.email_input
    }

    /// Errors from the last rejected submission.
    pub fn errors(&self) -> &ClientValidationErrors {
        &self.errors
    }
}

/// Outcome of submitting the add-client dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client appended; carries the persist result.
    Added(PersistOutcome),
    /// Input rejected; the dialog stays open.
    Rejected(ClientValidationErrors),
    /// Submit was called while the dialog was closed.
    NotOpen,
}

/// Everything the dashboard screen needs besides the roster itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    active_tab: NavTab,
    add_client: AddClientForm,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> NavTab {
        self.active_tab
    }

    pub fn add_client_form(&self) -> &AddClientForm {
        &self.add_client
    }

    /// Switches the active sidebar tab.
    pub fn select_tab(&mut self, tab: NavTab) {
        self.active_tab = tab;
    }

    /// Opens the add-client dialog with empty drafts.
    pub fn open_add_client(&mut self) {
        self.add_client = AddClientForm {
            open: true,
            ..AddClientForm::default()
        };
    }

    /// Closes the dialog and drops any pending input.
    pub fn close_add_client(&mut self) {
        self.add_client = AddClientForm::default();
    }

    pub fn set_name_input(&mut self, value: impl Into<String>) {
        self.add_client.name_input = value.into();
    }

    pub fn set_email_input(&mut self, value: impl Into<String>) {
        self.add_client.email_input = value.into();
    }

    /// Validates the drafts and appends them to `roster`.
    ///
    /// On success the dialog closes; on rejection it stays open with errors.
    pub fn submit_add_client<R: KeyValueRepository>(
        &mut self,
        roster: &mut ClientRoster<R>,
    ) -> SubmitOutcome {
        if !self.add_client.open {
            return SubmitOutcome::NotOpen;
        }

        match roster.add_client(&self.add_client.name_input, &self.add_client.email_input) {
            Ok(persisted) => {
                self.close_add_client();
                SubmitOutcome::Added(persisted)
            }
            Err(errors) => {
                self.add_client.errors = errors;
                SubmitOutcome::Rejected(errors)
            }
        }
    }
}
