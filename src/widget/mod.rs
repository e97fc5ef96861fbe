//! Widget system: trait and viewport scrolling.

pub mod traits;
pub mod scroll;

pub use traits::Widget;
pub use scroll::{ScrollState, ScrollbarState};
