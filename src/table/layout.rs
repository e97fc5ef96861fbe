//! Grid geometry in content space.
//!
//! Column offsets are fixed when a pass begins (widths come from the pass's
//! snapshot); row offsets grow as rows stream in. The header occupies the
//! first line. Columns are separated by [`COLUMN_GAP`]; rows are not.

use std::ops::Range;

use super::cells::CellTarget;
use super::sizing::COLUMN_GAP;
use crate::geometry::{Region, Size};

/// Height of the header line.
pub const HEADER_HEIGHT: i32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    column_x: Vec<i32>,
    column_widths: Vec<i32>,
    row_y: Vec<i32>,
    row_heights: Vec<i32>,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with the given column widths and no rows.
    pub fn reset(&mut self, widths: &[usize]) {
        self.column_widths = widths.iter().map(|&w| to_i32(w)).collect();
        self.column_x.clear();
        let mut x = 0;
        for &w in &self.column_widths {
            self.column_x.push(x);
            x += w + to_i32(COLUMN_GAP);
        }
        self.row_y.clear();
        self.row_heights.clear();
    }

    /// Append the next row below the last one.
    pub fn push_row(&mut self, height: usize) {
        let y = self.rows_bottom();
        self.row_y.push(y);
        self.row_heights.push(to_i32(height));
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    pub fn column_widths(&self) -> &[i32] {
        &self.column_widths
    }

    fn rows_bottom(&self) -> i32 {
        match (self.row_y.last(), self.row_heights.last()) {
            (Some(y), Some(h)) => y + h,
            _ => HEADER_HEIGHT,
        }
    }

    /// Scrollable extent of everything laid out so far.
    pub fn content_size(&self) -> Size {
        let width = match (self.column_x.last(), self.column_widths.last()) {
            (Some(x), Some(w)) => x + w,
            _ => 0,
        };
        Size::new(width, self.rows_bottom())
    }

    /// Horizontal span `(x, width)` of a column.
    pub fn column_span(&self, column: usize) -> Option<(i32, i32)> {
        Some((*self.column_x.get(column)?, *self.column_widths.get(column)?))
    }

    /// Vertical span `(y, height)` of a row.
    pub fn row_span(&self, row: usize) -> Option<(i32, i32)> {
        Some((*self.row_y.get(row)?, *self.row_heights.get(row)?))
    }

    /// Content-space rectangle of a cell, if laid out.
    pub fn cell_region(&self, target: CellTarget) -> Option<Region> {
        let (column, rows) = match target {
            CellTarget::Header(column) => (column, None),
            CellTarget::RowHeader(row) => (0, Some(row)),
            CellTarget::Data(row, column) => (column, Some(row)),
        };
        let (x, width) = self.column_span(column)?;
        let (y, height) = match rows {
            Some(row) => self.row_span(row)?,
            None => (0, HEADER_HEIGHT),
        };
        Some(Region::new(x, y, width, height))
    }

    /// The cell under a content-space point. Gaps and empty space hit nothing.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<CellTarget> {
        if x < 0 || y < 0 {
            return None;
        }
        let column = self.column_x.partition_point(|&cx| cx <= x).checked_sub(1)?;
        let (cx, width) = self.column_span(column)?;
        if x >= cx + width {
            return None;
        }
        if y < HEADER_HEIGHT {
            return Some(CellTarget::Header(column));
        }
        let row = self.row_y.partition_point(|&ry| ry <= y).checked_sub(1)?;
        let (ry, height) = self.row_span(row)?;
        if y >= ry + height {
            return None;
        }
        Some(if column == 0 {
            CellTarget::RowHeader(row)
        } else {
            CellTarget::Data(row, column)
        })
    }

    /// Columns that intersect `[x_start, x_end)`.
    pub fn columns_in(&self, x_start: i32, x_end: i32) -> Range<usize> {
        let first = self
            .column_x
            .iter()
            .zip(&self.column_widths)
            .position(|(&x, &w)| x + w > x_start)
            .unwrap_or(self.column_count());
        let end = self.column_x.partition_point(|&x| x < x_end);
        first..end.max(first)
    }

    /// Rows that intersect `[y_start, y_end)`.
    pub fn rows_in(&self, y_start: i32, y_end: i32) -> Range<usize> {
        let first = self
            .row_y
            .partition_point(|&y| y <= y_start)
            .saturating_sub(1);
        let first = match self.row_span(first) {
            Some((y, h)) if y + h <= y_start => first + 1,
            Some(_) => first,
            None => self.row_count(),
        };
        let end = self.row_y.partition_point(|&y| y < y_end);
        first..end.max(first)
    }
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
