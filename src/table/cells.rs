//! Materialized visual cells and their handler table.
//!
//! Cells live in a slotmap arena keyed by [`CellId`], with a secondary index
//! from [`CellTarget`] so hit-testing (which yields a target) and recoloring
//! (which needs the cell) stay separate. Input is bound through an explicit
//! table keyed by `(EventKind, CellTarget)` instead of closures on cells.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use super::selection::Coord;
use crate::theme::Theme;

new_key_type! {
    /// Stable handle to a materialized cell.
    pub struct CellId;
}

/// What a visual cell stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellTarget {
    /// Column title. `Header(0)` is the select-all corner.
    Header(usize),
    /// Index cell at the start of a row.
    RowHeader(usize),
    /// Data cell at `(row, column)`, column counted from the index column.
    Data(usize, usize),
}

impl CellTarget {
    /// Selection coordinate of a data cell.
    pub fn coord(self) -> Option<Coord> {
        match self {
            CellTarget::Data(row, column) => Some((row, column)),
            _ => None,
        }
    }
}

/// Input a cell can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    HoverEnter,
    HoverLeave,
    Click,
}

/// What an event on a cell resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAction {
    ToggleColumn(usize),
    ToggleRow(usize),
    ToggleCell(usize, usize),
    /// Show the hover color unless selected.
    Highlight,
    /// Back to the selected or base color.
    Restore,
}

/// Fill of a cell, resolved against the theme at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Header,
    Base,
    Hover,
    Selected,
}

impl Paint {
    pub fn color(self, theme: &Theme) -> &str {
        match self {
            Paint::Header => &theme.border,
            Paint::Base => &theme.widget_bg,
            Paint::Hover => &theme.hover,
            Paint::Selected => &theme.focus,
        }
    }
}

/// One drawn cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualCell {
    pub target: CellTarget,
    /// Display label, already truncated.
    pub label: String,
    pub paint: Paint,
}

impl VisualCell {
    pub fn new(target: CellTarget, label: impl Into<String>, paint: Paint) -> Self {
        Self {
            target,
            label: label.into(),
            paint,
        }
    }
}

/// Standard bindings for a target.
pub fn bindings_for(target: CellTarget) -> Vec<(EventKind, CellAction)> {
    match target {
        CellTarget::Header(column) => vec![(EventKind::Click, CellAction::ToggleColumn(column))],
        CellTarget::RowHeader(row) => vec![(EventKind::Click, CellAction::ToggleRow(row))],
        CellTarget::Data(row, column) => vec![
            (EventKind::HoverEnter, CellAction::Highlight),
            (EventKind::HoverLeave, CellAction::Restore),
            (EventKind::Click, CellAction::ToggleCell(row, column)),
        ],
    }
}

// ---------------------------------------------------------------------------
// CellArena
// ---------------------------------------------------------------------------

/// Every cell materialized by the current pass.
#[derive(Debug, Default)]
pub struct CellArena {
    cells: SlotMap<CellId, VisualCell>,
    by_target: HashMap<CellTarget, CellId>,
    handlers: HashMap<(EventKind, CellTarget), CellAction>,
}

impl CellArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything; called when a new pass begins.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.by_target.clear();
        self.handlers.clear();
    }

    /// Add a cell with its bindings. An existing cell for the same target is
    /// replaced.
    pub fn insert(&mut self, cell: VisualCell, bindings: &[(EventKind, CellAction)]) -> CellId {
        let target = cell.target;
        if let Some(old) = self.by_target.remove(&target) {
            self.cells.remove(old);
            for kind in [EventKind::HoverEnter, EventKind::HoverLeave, EventKind::Click] {
                self.handlers.remove(&(kind, target));
            }
        }
        let id = self.cells.insert(cell);
        self.by_target.insert(target, id);
        for &(kind, action) in bindings {
            self.handlers.insert((kind, target), action);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, id: CellId) -> Option<&VisualCell> {
        self.cells.get(id)
    }

    pub fn id_of(&self, target: CellTarget) -> Option<CellId> {
        self.by_target.get(&target).copied()
    }

    pub fn by_target(&self, target: CellTarget) -> Option<&VisualCell> {
        self.id_of(target).and_then(|id| self.cells.get(id))
    }

    /// Action bound to `kind` on `target`, if any.
    pub fn handler(&self, kind: EventKind, target: CellTarget) -> Option<CellAction> {
        self.handlers.get(&(kind, target)).copied()
    }

    /// Recolor one cell. Returns false if the cell is not materialized yet.
    pub fn set_paint(&mut self, target: CellTarget, paint: Paint) -> bool {
        match self.by_target.get(&target).and_then(|&id| self.cells.get_mut(id)) {
            Some(cell) => {
                cell.paint = paint;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &VisualCell)> {
        self.cells.iter()
    }
}
