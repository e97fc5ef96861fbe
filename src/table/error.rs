//! Errors surfaced by table mutators.

use super::source::SourceError;

/// Errors from table mutators.
///
/// A failing mutator never applies part of its input; the table keeps its
/// previous data and no rebuild is started.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("failed to load tabular source: {0}")]
    Source(#[from] SourceError),
}
