//! Cell matrix: the table's data with its synthesized index column.
//!
//! Column 0 is always the index column (empty title); `row[0]` holds the
//! 1-based row number and is regenerated whenever rows are replaced. Every
//! mutator validates the whole input before touching the matrix, so a
//! rejected call leaves it unchanged.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use super::error::TableError;
use super::selection::Extent;

// ---------------------------------------------------------------------------
// CellValue
// ---------------------------------------------------------------------------

/// A single cell: anything that can be shown as a string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Infer a value from raw text: integers, finite floats, and booleans
    /// are typed, the empty string is `Empty`, everything else is text.
    ///
    /// Digit strings too large for `i64` stay text so no digits are lost;
    /// only text with a decimal point or exponent becomes a float.
    pub fn infer(raw: &str) -> CellValue {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(n) = raw.parse::<i64>() {
            return CellValue::Int(n);
        }
        if raw.contains(['.', 'e', 'E']) {
            if let Ok(f) = raw.parse::<f64>() {
                if f.is_finite() {
                    return CellValue::Float(f);
                }
            }
        }
        match raw {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::Text(raw.to_owned()),
        }
    }

    /// Number of display lines (at least 1).
    pub fn line_count(&self) -> usize {
        match self {
            CellValue::Text(s) => s.lines().count().max(1),
            _ => 1,
        }
    }

    /// Widest line in terminal columns.
    pub fn display_width(&self) -> usize {
        text_width(&self.to_string())
    }
}

/// Widest line of `text` in terminal columns.
pub fn text_width(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n.into())
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}

/// Build a row from anything convertible to cells.
pub fn row<I, T>(cells: I) -> Vec<CellValue>
where
    I: IntoIterator<Item = T>,
    T: Into<CellValue>,
{
    cells.into_iter().map(Into::into).collect()
}

// ---------------------------------------------------------------------------
// CellMatrix
// ---------------------------------------------------------------------------

/// Ordered rows of ordered cells, with a leading index column.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMatrix {
    /// `columns[0]` is the index column's (empty) title.
    columns: Vec<String>,
    /// Each row has `columns.len()` cells; `row[0]` is the 1-based index.
    rows: Vec<Vec<CellValue>>,
}

impl CellMatrix {
    /// An empty matrix holding only the index column.
    pub fn new() -> Self {
        Self {
            columns: vec![String::new()],
            rows: Vec::new(),
        }
    }

    /// Build from data columns and data rows (no index cells).
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        let mut matrix = Self::new();
        matrix.set_columns(columns);
        matrix.set_data(rows)?;
        Ok(matrix)
    }

    /// Same columns, no rows. The current rows are not copied.
    pub fn headers_only(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// Same columns holding `rows` instead. The current rows are not copied.
    pub fn with_rows(&self, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        let mut matrix = self.headers_only();
        matrix.set_data(rows)?;
        Ok(matrix)
    }

    /// All column titles, index column included.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, index cells included.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Column count, index column included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of caller-supplied columns.
    pub fn data_column_count(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Live dimensions, as consumed by the selection model.
    pub fn extent(&self) -> Extent {
        Extent::new(self.row_count(), self.column_count())
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Check that every row has one cell per data column.
    pub fn check_rows(&self, rows: &[Vec<CellValue>]) -> Result<(), TableError> {
        let expected = self.data_column_count();
        match rows.iter().position(|r| r.len() != expected) {
            Some(row) => Err(TableError::ShapeMismatch {
                row,
                expected,
                found: rows[row].len(),
            }),
            None => Ok(()),
        }
    }

    /// Replace all rows. Index cells are generated.
    pub fn set_data(&mut self, rows: Vec<Vec<CellValue>>) -> Result<(), TableError> {
        self.check_rows(&rows)?;
        self.rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, data)| with_index(i, data))
            .collect();
        Ok(())
    }

    /// Replace the data column titles.
    ///
    /// Existing rows are reshaped to the new width: extra cells are dropped,
    /// missing ones are filled with [`CellValue::Empty`].
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = std::iter::once(String::new()).chain(columns).collect();
        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, CellValue::Empty);
        }
    }

    /// Append one row; its index is the new row count.
    pub fn add_row(&mut self, data: Vec<CellValue>) -> Result<(), TableError> {
        let expected = self.data_column_count();
        if data.len() != expected {
            return Err(TableError::ShapeMismatch {
                row: self.rows.len(),
                expected,
                found: data.len(),
            });
        }
        self.rows.push(with_index(self.rows.len(), data));
        Ok(())
    }

    /// Drop every row, keep the columns.
    pub fn clear_data(&mut self) {
        self.rows.clear();
    }

    /// Data column titles (index column excluded).
    pub fn column_headers(&self) -> &[String] {
        &self.columns[1..]
    }

    /// Data rows without their index cells.
    pub fn data(&self) -> Vec<Vec<CellValue>> {
        self.rows.iter().map(|r| r[1..].to_vec()).collect()
    }

    /// The index cell of every row.
    pub fn row_headers(&self) -> Vec<CellValue> {
        self.rows.iter().map(|r| r[0].clone()).collect()
    }
}

impl Default for CellMatrix {
    fn default() -> Self {
        Self::new()
    }
}

fn with_index(i: usize, data: Vec<CellValue>) -> Vec<CellValue> {
    let mut full = Vec::with_capacity(data.len() + 1);
    full.push(CellValue::from(i + 1));
    full.extend(data);
    full
}
