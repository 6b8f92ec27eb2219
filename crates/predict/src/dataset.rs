//! Tabular input for the classifier.
//!
//! The pipeline synthesizes a two-line comma-separated table per
//! prediction: a header naming every predictor column plus the target, and
//! one data row. This parser is private to the prediction path; cells are
//! plain numeric, boolean, or categorical tokens, so no quoting rules
//! apply.

use snafu::Snafu;

/// Errors from dataset parsing.
#[derive(Debug, Snafu)]
pub enum DatasetError {
    /// The input carries no header line.
    #[snafu(display("dataset is empty"))]
    Empty,

    /// A data row's cell count does not match the header.
    #[snafu(display("row on line {line} has {found} columns, header has {expected}"))]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// A parsed columnar table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parses comma-separated text: one header line, then data rows, each
    /// with exactly the header's column count.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Empty` for input with no header and
    /// `DatasetError::ColumnCount` for any row that does not line up.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(DatasetError::Empty)?;
        let columns: Vec<String> = header.split(',').map(str::to_string).collect();

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            let cells: Vec<String> = line.split(',').map(str::to_string).collect();
            if cells.len() != columns.len() {
                return Err(DatasetError::ColumnCount {
                    line: offset + 2,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
            rows.push(cells);
        }

        Ok(Dataset { columns, rows })
    }

    /// Column names, in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The cell at `row` under `column`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}
