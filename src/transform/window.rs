//! Supervised windowing: reshaping a time series into lagged feature columns.

use crate::core::{FeatureFrame, ObservationTable};
use crate::error::{EpicastError, Result};

/// Configuration for supervised windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Number of past lag observations per feature (the `(t-i)` blocks).
    pub n_in: usize,
    /// Number of current/future offsets per feature (the `(t)`/`(t+i)` blocks).
    pub n_out: usize,
    /// Drop rows containing any undefined (shifted-out-of-range) cell.
    pub drop_incomplete: bool,
}

impl WindowConfig {
    pub fn new(n_in: usize, n_out: usize, drop_incomplete: bool) -> Self {
        Self {
            n_in,
            n_out,
            drop_incomplete,
        }
    }
}

/// Name a shifted column copy.
///
/// Negative offsets name past lags (`cases(t-2)`), zero names the current
/// value (`cases(t)`), positive offsets name future values (`cases(t+1)`).
/// Downstream code addresses columns by these strings, so the format is
/// load-bearing.
pub fn lag_column_name(base: &str, offset: i64) -> String {
    match offset {
        0 => format!("{}(t)", base),
        o if o < 0 => format!("{}(t-{})", base, -o),
        o => format!("{}(t+{})", base, o),
    }
}

/// Frame an observation table as a supervised-learning feature frame.
///
/// For each past lag `i` from `n_in` down to 1, every column is copied
/// shifted forward by `i` rows and named `<col>(t-i)`; then for each
/// future offset `i` from 0 to `n_out - 1`, every column is copied
/// shifted backward by `i` rows and named `<col>(t)` / `<col>(t+i)`.
/// Cells shifted out of range are undefined. With `drop_incomplete`,
/// rows containing any undefined cell are removed — for a plain
/// sequential series that is the first `n_in` and last `n_out - 1` rows.
///
/// The output has `n_columns * (n_in + n_out)` columns, past blocks
/// furthest-lag first, then current/future blocks in increasing offset.
pub fn supervised_frame(table: &ObservationTable, config: &WindowConfig) -> Result<FeatureFrame> {
    if table.is_empty() || table.n_columns() == 0 {
        return Err(EpicastError::EmptyData);
    }

    let n = table.n_rows();
    let mut names: Vec<String> = Vec::with_capacity(table.n_columns() * (config.n_in + config.n_out));
    let mut offsets: Vec<i64> = Vec::new();

    for i in (1..=config.n_in).rev() {
        offsets.push(-(i as i64));
    }
    for i in 0..config.n_out {
        offsets.push(i as i64);
    }

    for &offset in &offsets {
        for base in table.columns() {
            names.push(lag_column_name(base, offset));
        }
    }

    let mut rows: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(names.len()); n];
    for &offset in &offsets {
        for base in table.columns() {
            let series = table.column(base)?;
            for (r, row) in rows.iter_mut().enumerate() {
                let source = r as i64 + offset;
                let cell = if source >= 0 && (source as usize) < n {
                    Some(series[source as usize])
                } else {
                    None
                };
                row.push(cell);
            }
        }
    }

    let frame = FeatureFrame::from_rows(names, rows)?;
    if config.drop_incomplete {
        Ok(frame.drop_incomplete())
    } else {
        Ok(frame)
    }
}

/// Frame a single series (a plain list of scalars) as one feature column.
pub fn supervised_series(series: &[f64], name: &str, config: &WindowConfig) -> Result<FeatureFrame> {
    let table = ObservationTable::new(vec![name.to_string()], vec![series.to_vec()])?;
    supervised_frame(&table, config)
}

/// Resolve all `<base>(t-k)` columns to positions, furthest lag first.
///
/// Returns `(column_index, k)` pairs ordered by decreasing `k`, so the
/// last entry is the nearest lag `<base>(t-1)`. Resolving names to
/// positions once up front keeps all subsequent addressing positional.
pub fn target_lag_columns(columns: &[String], base: &str) -> Vec<(usize, usize)> {
    let mut lags: Vec<(usize, usize)> = Vec::new();
    for (idx, name) in columns.iter().enumerate() {
        if let Some(rest) = name
            .strip_prefix(base)
            .and_then(|s| s.strip_prefix("(t-"))
            .and_then(|s| s.strip_suffix(')'))
        {
            if let Ok(k) = rest.parse::<usize>() {
                lags.push((idx, k));
            }
        }
    }
    lags.sort_by(|a, b| b.1.cmp(&a.1));
    lags
}
