//! Pure dashboard view model.
//!
//! # Responsibility
//! - Turn caller-owned state plus the roster into plain render data.
//!
//! # Invariants
//! - `render_dashboard` has no side effects and reads no globals.
//! - `total_clients` always equals `rows.len()`.
//! - Exactly one nav item is active.

use crate::dashboard::state::{DashboardState, NavTab};
use crate::model::client::{ClientField, ClientRecord};

pub const BRAND_NAME: &str = "EMERALD COVE";
pub const BRAND_SUFFIX: &str = "PROPERTIES";
pub const BRAND_TAGLINE: &str = "WHERE EVERY HOME IS A TREASURE";

/// Header strip contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub brand: &'static str,
    pub brand_suffix: &'static str,
    pub tagline: &'static str,
}

/// One sidebar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItemView {
    pub tab: NavTab,
    pub label: &'static str,
    pub active: bool,
}

/// One row of the clients table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRowView {
    pub name: String,
    pub email: String,
}

/// Add-client dialog contents, present only while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddClientDialogView {
    pub name_input: String,
    pub email_input: String,
    pub name_error: Option<String>,
    pub email_error: Option<String>,
}

/// Complete render data for the dashboard screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub header: HeaderView,
    pub nav: Vec<NavItemView>,
    pub title: &'static str,
    pub total_clients: usize,
    pub rows: Vec<ClientRowView>,
    pub add_client_dialog: Option<AddClientDialogView>,
}

/// Builds the dashboard view model from state and roster contents.
pub fn render_dashboard(state: &DashboardState, clients: &[ClientRecord]) -> DashboardView {
    let active = state.active_tab();
    let nav = NavTab::ALL
        .iter()
        .map(|&tab| NavItemView {
            tab,
            label: tab.label(),
            active: tab == active,
        })
        .collect();

    let rows = clients
        .iter()
        .map(|record| ClientRowView {
            name: record.name().to_string(),
            email: record.email().to_string(),
        })
        .collect::<Vec<_>>();

    let form = state.add_client_form();
    let add_client_dialog = form.is_open().then(|| {
        let errors = form.errors();
        AddClientDialogView {
            name_input: form.name_input().to_string(),
            email_input: form.email_input().to_string(),
            name_error: errors.for_field(ClientField::Name).map(|e| e.to_string()),
            email_error: errors.for_field(ClientField::Email).map(|e| e.to_string()),
        }
    });

    DashboardView {
        header: HeaderView {
            brand: BRAND_NAME,
            brand_suffix: BRAND_SUFFIX,
            tagline: BRAND_TAGLINE,
        },
        nav,
        title: active.label(),
        total_clients: rows.len(),
        rows,
        add_client_dialog,
    }
}
