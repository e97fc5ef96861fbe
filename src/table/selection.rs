//! Selection model: a set of selected `(row, column)` coordinates.
//!
//! Rows are 0-based. Columns are counted with the synthetic index column at 0,
//! so data columns start at 1. Column 0 is never selected itself; it is the
//! handle for row toggles and, in the header, for select-all.
//!
//! Every toggle takes the live [`Extent`] and reports which coordinates flipped,
//! so the renderer can recolor exactly those cells.

use std::collections::BTreeSet;

/// `(row, column)` with the index column at column 0.
pub type Coord = (usize, usize);

/// Live matrix dimensions. `columns` includes the index column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub rows: usize,
    pub columns: usize,
}

impl Extent {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Whether `(row, column)` names a selectable data cell.
    pub fn contains_data(&self, (row, column): Coord) -> bool {
        row < self.rows && column >= 1 && column < self.columns
    }
}

/// Coordinates whose selected state flipped in one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub changed: Vec<Coord>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.changed.iter()
    }
}

/// The set of selected data cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: BTreeSet<Coord>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.selected.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.selected.iter().copied()
    }

    // -----------------------------------------------------------------------
    // Toggles
    // -----------------------------------------------------------------------

    /// Flip one data cell. Column 0 and out-of-range coordinates are ignored.
    pub fn toggle_cell(&mut self, row: usize, column: usize, extent: Extent) -> SelectionChange {
        let coord = (row, column);
        if !extent.contains_data(coord) {
            return SelectionChange::default();
        }
        if !self.selected.remove(&coord) {
            self.selected.insert(coord);
        }
        SelectionChange {
            changed: vec![coord],
        }
    }

    /// Select the whole row, or deselect it if it is already fully selected.
    pub fn toggle_row(&mut self, row: usize, extent: Extent) -> SelectionChange {
        if row >= extent.rows {
            return SelectionChange::default();
        }
        let group: BTreeSet<Coord> = (1..extent.columns).map(|c| (row, c)).collect();
        self.toggle_group(group)
    }

    /// Select the whole column, or deselect it if it is already fully
    /// selected. Column 0 selects every data cell, or clears the selection
    /// when everything is already selected.
    pub fn toggle_column(&mut self, column: usize, extent: Extent) -> SelectionChange {
        if column >= extent.columns {
            return SelectionChange::default();
        }
        if column == 0 {
            let all: BTreeSet<Coord> = (0..extent.rows)
                .flat_map(|r| (1..extent.columns).map(move |c| (r, c)))
                .collect();
            return if all.is_subset(&self.selected) {
                self.clear()
            } else {
                self.add_group(&all)
            };
        }
        let group: BTreeSet<Coord> = (0..extent.rows).map(|r| (r, column)).collect();
        self.toggle_group(group)
    }

    /// Deselect everything.
    pub fn clear(&mut self) -> SelectionChange {
        let changed = std::mem::take(&mut self.selected).into_iter().collect();
        SelectionChange { changed }
    }

    /// Drop coordinates that no longer name a data cell in `extent`.
    pub fn retain_within(&mut self, extent: Extent) -> SelectionChange {
        let (keep, stale): (BTreeSet<Coord>, BTreeSet<Coord>) = std::mem::take(&mut self.selected)
            .into_iter()
            .partition(|&coord| extent.contains_data(coord));
        self.selected = keep;
        SelectionChange {
            changed: stale.into_iter().collect(),
        }
    }

    /// Selection with columns remapped to 0-based data columns.
    pub fn selected_data_indices(&self) -> BTreeSet<(usize, usize)> {
        self.selected.iter().map(|&(r, c)| (r, c - 1)).collect()
    }

    fn toggle_group(&mut self, group: BTreeSet<Coord>) -> SelectionChange {
        if group.is_subset(&self.selected) {
            self.selected = self.selected.difference(&group).copied().collect();
            SelectionChange {
                changed: group.into_iter().collect(),
            }
        } else {
            self.add_group(&group)
        }
    }

    fn add_group(&mut self, group: &BTreeSet<Coord>) -> SelectionChange {
        let changed: Vec<Coord> = group.difference(&self.selected).copied().collect();
        self.selected.extend(changed.iter().copied());
        SelectionChange { changed }
    }
}
