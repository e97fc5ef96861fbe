//! Leaf widgets composed by the table view.

pub mod progress_bar;

pub use progress_bar::ProgressBar;
