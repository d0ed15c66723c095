//! Flutter-facing bindings for the Emerald Cove client roster.

pub mod api;
