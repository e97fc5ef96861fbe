//! Headless testing framework: TablePilot, snapshot helpers.
//!
//! Use the [`TablePilot`] to drive a [`TableView`](crate::table::TableView)
//! without a real terminal. Use [`render_to_string`] and related helpers to
//! capture widget output as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::TablePilot;
pub use snapshot::{compositor_to_string, render_to_string, render_with_theme, strips_to_string};
