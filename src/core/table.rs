//! ObservationTable: named numeric columns over time-ordered rows.

use crate::error::{EpicastError, Result};

/// A table of raw observations: named `f64` columns of equal length,
/// stored column-major, with an optional per-row group label (state).
///
/// Rows are assumed to be in non-decreasing time order within a group;
/// the table itself does not reorder anything.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    columns: Vec<String>,
    /// Column-major: values[column][row]
    values: Vec<Vec<f64>>,
    groups: Option<Vec<String>>,
}

impl ObservationTable {
    /// Create a table from column names and column-major values.
    ///
    /// All columns must have the same length and the name count must
    /// match the column count.
    pub fn new(columns: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(EpicastError::DimensionMismatch {
                expected: columns.len(),
                got: values.len(),
            });
        }

        if let Some(first) = values.first() {
            for series in &values {
                if series.len() != first.len() {
                    return Err(EpicastError::DimensionMismatch {
                        expected: first.len(),
                        got: series.len(),
                    });
                }
            }
        }

        Ok(Self {
            columns,
            values,
            groups: None,
        })
    }

    /// Attach a per-row group label column (e.g. state names).
    pub fn with_groups(mut self, groups: Vec<String>) -> Result<Self> {
        if groups.len() != self.n_rows() {
            return Err(EpicastError::DimensionMismatch {
                expected: self.n_rows(),
                got: groups.len(),
            });
        }
        self.groups = Some(groups);
        Ok(self)
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.values.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Group labels, if attached.
    pub fn groups(&self) -> Option<&[String]> {
        self.groups.as_deref()
    }

    /// Resolve a column name to its positional index.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EpicastError::MissingColumn(name.to_string()))
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        let idx = self.column_index(name)?;
        Ok(&self.values[idx])
    }

    /// Replace a column's values by name. The new series must match the
    /// table's row count.
    pub fn set_column(&mut self, name: &str, series: Vec<f64>) -> Result<()> {
        if series.len() != self.n_rows() {
            return Err(EpicastError::DimensionMismatch {
                expected: self.n_rows(),
                got: series.len(),
            });
        }
        let idx = self.column_index(name)?;
        self.values[idx] = series;
        Ok(())
    }

    /// Rename a column in place.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        let idx = self.column_index(from)?;
        self.columns[idx] = to.to_string();
        Ok(())
    }

    /// Get one row across all columns.
    pub fn row(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.n_rows() {
            return Err(EpicastError::IndexOutOfBounds {
                index,
                size: self.n_rows(),
            });
        }
        Ok(self.values.iter().map(|col| col[index]).collect())
    }

    /// Select the rows belonging to one group, preserving order.
    ///
    /// Fails with [`EpicastError::MissingColumn`] if no group labels are
    /// attached; an unknown group name yields an empty table.
    pub fn filter_group(&self, group: &str) -> Result<ObservationTable> {
        let groups = self
            .groups
            .as_ref()
            .ok_or_else(|| EpicastError::MissingColumn("group labels".to_string()))?;

        let keep: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.as_str() == group)
            .map(|(i, _)| i)
            .collect();

        let values: Vec<Vec<f64>> = self
            .values
            .iter()
            .map(|col| keep.iter().map(|&i| col[i]).collect())
            .collect();

        Ok(ObservationTable {
            columns: self.columns.clone(),
            values,
            groups: Some(vec![group.to_string(); keep.len()]),
        })
    }
}
