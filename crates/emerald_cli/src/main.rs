//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `emerald_core` linkage.
//! - Print a deterministic session-only roster summary.

use emerald_core::{render_dashboard, ClientRoster, DashboardState, MemoryKeyValueRepository};

fn main() {
    println!("emerald_core ping={}", emerald_core::ping());
    println!("emerald_core version={}", emerald_core::core_version());

    // Session-only store: always starts from the seed set.
    let store = MemoryKeyValueRepository::new();
    let roster = ClientRoster::load(&store);
    let view = render_dashboard(&DashboardState::new(), roster.clients());
    println!("emerald_core total_clients={}", view.total_clients);
    for row in &view.rows {
        println!("  {} <{}>", row.name, row.email);
    }
}
