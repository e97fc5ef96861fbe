//! Column width, row height, and label truncation.
//!
//! All measurements are in terminal cells. Widths include the label padding
//! on both sides; the gap between columns is added by the layout.

use super::matrix::{text_width, CellMatrix, CellValue};

/// Width used for data columns when nothing else is configured.
pub const DEFAULT_COLUMN_WIDTH: usize = 10;
/// Height of a row when autofit is off and no fixed height is set.
pub const DEFAULT_ROW_HEIGHT: usize = 1;
/// Blank cells on each side of a label.
pub const CELL_PADDING: usize = 1;
/// Blank cells between adjacent columns.
pub const COLUMN_GAP: usize = 1;

const ELLIPSIS: char = '…';

/// How cells are measured and labels shortened.
///
/// Precedence for data columns: autofit, then the fixed width, then a
/// default derived from the header. The index column is sized from the row
/// count alone.
///
/// Truncation applies to headers and data cells. Row numbers in the index
/// column are exempt and always show in full.
///
/// Autofit reads every cell, so [`column_widths`](Self::column_widths) runs
/// on the build worker, never on the caller of a table mutator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizingPolicy {
    pub column_width: Option<usize>,
    pub row_height: Option<usize>,
    pub autofit: bool,
    pub truncate: Option<usize>,
}

impl SizingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed width for every data column (builder).
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = Some(width);
        self
    }

    /// Fixed height for every row (builder).
    pub fn with_row_height(mut self, height: usize) -> Self {
        self.row_height = Some(height);
        self
    }

    /// Size columns and rows from their content (builder).
    pub fn with_autofit(mut self, autofit: bool) -> Self {
        self.autofit = autofit;
        self
    }

    /// Clip displayed header and data labels to `limit` characters, ellipsis
    /// included (builder). Index labels are not clipped.
    pub fn with_truncate(mut self, limit: usize) -> Self {
        self.truncate = Some(limit);
        self
    }

    /// Label shown for a data cell or data header. Stored values are untouched.
    pub fn display_label(&self, text: &str) -> String {
        match self.truncate {
            Some(limit) => truncate_label(text, limit),
            None => text.to_owned(),
        }
    }

    /// Width of every column of `matrix`, index column first.
    pub fn column_widths(&self, matrix: &CellMatrix) -> Vec<usize> {
        (0..matrix.column_count())
            .map(|column| self.column_width(matrix, column))
            .collect()
    }

    /// Width of one column of `matrix`.
    pub fn column_width(&self, matrix: &CellMatrix, column: usize) -> usize {
        let pad = 2 * CELL_PADDING;
        if column == 0 {
            return digit_count(matrix.row_count()) + pad;
        }
        let header = matrix.columns().get(column).map(String::as_str).unwrap_or("");
        if self.autofit {
            let header_width = text_width(&self.display_label(header));
            let widest = matrix
                .rows()
                .iter()
                .filter_map(|r| r.get(column))
                .map(|cell| text_width(&self.display_label(&cell.to_string())))
                .fold(header_width, usize::max);
            return widest + pad;
        }
        if let Some(width) = self.column_width {
            return width;
        }
        (text_width(&self.display_label(header)) + pad).max(DEFAULT_COLUMN_WIDTH)
    }

    /// Height of a row given its cells.
    pub fn row_height(&self, cells: &[CellValue]) -> usize {
        if self.autofit {
            return cells
                .iter()
                .map(CellValue::line_count)
                .max()
                .unwrap_or(DEFAULT_ROW_HEIGHT);
        }
        self.row_height.unwrap_or(DEFAULT_ROW_HEIGHT)
    }
}

/// Decimal digits of `n`; the widest index label has as many as the row count.
fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Keep at most `limit` characters; a clipped label ends with an ellipsis.
pub fn truncate_label(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    if limit == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(limit - 1).collect();
    out.push(ELLIPSIS);
    out
}
