//! FeatureFrame: the windowed supervised-learning table.

use crate::error::{EpicastError, Result};

/// A windowed feature table: named columns over row-major cells.
///
/// Cells are `Option<f64>`; `None` marks a value that is undefined —
/// shifted out of range by windowing, or not yet filled during a rollout.
/// The undefined marker is explicit rather than a sentinel value, so a
/// legitimate observation of `0.0` is never confused with a missing one.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    /// Row-major: rows[row][column]
    rows: Vec<Vec<Option<f64>>>,
}

impl FeatureFrame {
    /// Create an empty frame with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a frame from column names and row-major cells.
    ///
    /// Every row must match the column count.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(EpicastError::DimensionMismatch {
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Resolve a column name to its positional index.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EpicastError::MissingColumn(name.to_string()))
    }

    /// Read one cell by position.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<f64>> {
        self.check_position(row, col)?;
        Ok(self.rows[row][col])
    }

    /// Write one cell by position.
    pub fn set(&mut self, row: usize, col: usize, value: Option<f64>) -> Result<()> {
        self.check_position(row, col)?;
        self.rows[row][col] = value;
        Ok(())
    }

    /// Append a row. The row must match the column count.
    pub fn push_row(&mut self, row: Vec<Option<f64>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(EpicastError::DimensionMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Read one row's cells.
    pub fn row(&self, row: usize) -> Result<&[Option<f64>]> {
        if row >= self.rows.len() {
            return Err(EpicastError::IndexOutOfBounds {
                index: row,
                size: self.rows.len(),
            });
        }
        Ok(&self.rows[row])
    }

    /// Read one row as a dense vector, presenting undefined cells as 0.0.
    ///
    /// This is the predictor boundary: models consume plain numeric rows,
    /// and an unfilled lag is presented as zero. Inside the frame the
    /// cell stays `None`.
    pub fn row_dense(&self, row: usize) -> Result<Vec<f64>> {
        Ok(self.row(row)?.iter().map(|c| c.unwrap_or(0.0)).collect())
    }

    /// Read one column's cells.
    pub fn column_cells(&self, col: usize) -> Result<Vec<Option<f64>>> {
        if col >= self.columns.len() {
            return Err(EpicastError::IndexOutOfBounds {
                index: col,
                size: self.columns.len(),
            });
        }
        Ok(self.rows.iter().map(|r| r[col]).collect())
    }

    /// Drop every row containing an undefined cell, preserving order.
    pub fn drop_incomplete(mut self) -> Self {
        self.rows.retain(|row| row.iter().all(|c| c.is_some()));
        self
    }

    fn check_position(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(EpicastError::IndexOutOfBounds {
                index: row,
                size: self.rows.len(),
            });
        }
        if col >= self.columns.len() {
            return Err(EpicastError::IndexOutOfBounds {
                index: col,
                size: self.columns.len(),
            });
        }
        Ok(())
    }
}
