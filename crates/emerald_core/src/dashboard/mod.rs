//! Dashboard screen state and view model.
//!
//! # Responsibility
//! - Hold navigation and dialog state as explicit caller-owned values.
//! - Render that state plus the roster into plain data for a UI shell.

pub mod state;
pub mod view;
