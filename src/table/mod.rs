//! The table view and its progressive rendering pipeline.
//!
//! Data flows from the [`CellMatrix`] through a worker-thread builder and a
//! FIFO [`queue`] into the [`IncrementalRenderer`], which materializes cells
//! one instruction per step on the UI context. Input on cells resolves
//! through the handler table into pure [`SelectionModel`] toggles.

pub mod builder;
pub mod cells;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod progress;
pub mod queue;
pub mod renderer;
pub mod selection;
pub mod sizing;
pub mod source;
pub mod view;

pub use cells::{CellAction, CellArena, CellId, CellTarget, EventKind, Paint, VisualCell};
pub use error::TableError;
pub use layout::GridLayout;
pub use matrix::{row, CellMatrix, CellValue};
pub use progress::{Progress, ProgressState};
pub use queue::{QueuePoll, RenderInstruction};
pub use renderer::{IncrementalRenderer, StepOutcome};
pub use selection::{Coord, Extent, SelectionChange, SelectionModel};
pub use sizing::SizingPolicy;
pub use source::{CsvSource, MemorySource, SourceError, TabularSource};
pub use view::{TableOptions, TableView};
