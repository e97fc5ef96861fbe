//! # canvas-table
//!
//! A themed, terminal-drawn table view whose grid is built on a background
//! thread and streamed to the UI one instruction at a time, so input stays
//! responsive while very large tables load.
//!
//! ## Core Systems
//!
//! - **[`table`]** — Cell matrix, builder, render queue, incremental renderer, selection model, sizing
//! - **[`theme`]** — Dark and light palettes with font info
//! - **[`widget`]** — Widget trait and viewport scrolling
//! - **[`widgets`]** — Leaf widgets used by the table (progress bar)
//! - **[`event`]** — Input events converted from crossterm
//! - **[`render`]** — Strips, frame-diffing compositor, and crossterm driver
//! - **[`testing`]** — Headless pilot and snapshot helpers
//! - **[`geometry`]** — Offset, Size, Region primitives

// Foundation
pub mod geometry;
pub mod theme;

// Table core
pub mod table;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Testing support
pub mod testing;

pub use table::{TableError, TableOptions, TableView};
pub use theme::{Theme, ThemeMode};
