//! External tabular sources.
//!
//! A source yields a header row and ordered rows of cells. [`MemorySource`]
//! wraps data already in memory; [`CsvSource`] reads CSV text from a file or
//! a string. Sources are read lazily: nothing is opened until the table asks
//! for columns or rows, so read failures surface from `set_from_source`.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::matrix::CellValue;

/// Errors from reading a tabular source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything that can hand the table a header row and data rows.
pub trait TabularSource {
    /// Data column titles (no index column).
    fn columns(&self) -> Result<Vec<String>, SourceError>;

    /// Data rows in order (no index cells).
    fn rows(&self) -> Result<Vec<Vec<CellValue>>, SourceError>;

    /// Columns and rows from a single read, so both describe the same data.
    ///
    /// The table loads through this method. Sources backed by something that
    /// can change between reads should override it.
    fn table(&self) -> Result<(Vec<String>, Vec<Vec<CellValue>>), SourceError> {
        Ok((self.columns()?, self.rows()?))
    }
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// In-memory columns and rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl MemorySource {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }
}

impl TabularSource for MemorySource {
    fn columns(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.columns.clone())
    }

    fn rows(&self) -> Result<Vec<Vec<CellValue>>, SourceError> {
        Ok(self.rows.clone())
    }
}

// ---------------------------------------------------------------------------
// CsvSource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum CsvOrigin {
    Path(PathBuf),
    Text(String),
}

/// CSV with a header row. Cell types are inferred with [`CellValue::infer`].
///
/// Records whose field count differs from the header are rejected.
#[derive(Debug, Clone)]
pub struct CsvSource {
    origin: CsvOrigin,
    delimiter: u8,
}

impl CsvSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            origin: CsvOrigin::Path(path.as_ref().to_path_buf()),
            delimiter: b',',
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            origin: CsvOrigin::Text(text.into()),
            delimiter: b',',
        }
    }

    /// Use a delimiter other than `,` (builder).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn open(&self) -> Result<csv::Reader<Box<dyn Read + '_>>, SourceError> {
        let input: Box<dyn Read + '_> = match &self.origin {
            CsvOrigin::Path(path) => Box::new(File::open(path)?),
            CsvOrigin::Text(text) => Box::new(text.as_bytes()),
        };
        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(input))
    }
}

impl TabularSource for CsvSource {
    fn columns(&self) -> Result<Vec<String>, SourceError> {
        headers(&mut self.open()?)
    }

    fn rows(&self) -> Result<Vec<Vec<CellValue>>, SourceError> {
        records(&mut self.open()?)
    }

    fn table(&self) -> Result<(Vec<String>, Vec<Vec<CellValue>>), SourceError> {
        let mut reader = self.open()?;
        let columns = headers(&mut reader)?;
        Ok((columns, records(&mut reader)?))
    }
}

fn headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>, SourceError> {
    Ok(reader.headers()?.iter().map(str::to_owned).collect())
}

fn records<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<Vec<CellValue>>, SourceError> {
    reader
        .records()
        .map(|record| -> Result<Vec<CellValue>, SourceError> {
            let record = record?;
            Ok(record.iter().map(CellValue::infer).collect())
        })
        .collect()
}
