//! Widget trait: render into strips within a region.
//!
//! Every drawable element (the table view, the progress bar) implements
//! [`Widget`]. Widgets read colors from the shared [`Theme`] and never keep
//! a reference to it.

use std::any::Any;

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::theme::Theme;

/// Core trait implemented by all widgets.
///
/// Object-safe: methods take `&self` and return owned values.
pub trait Widget {
    /// Type name, used in logs and snapshots (e.g. "TableView").
    fn widget_type(&self) -> &str;

    /// Render into strips covering at most `region`.
    fn render(&self, region: Region, theme: &Theme) -> Vec<Strip>;

    /// Whether this widget takes pointer and keyboard input.
    fn can_focus(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
