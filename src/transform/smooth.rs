//! Moving-average smoothing over observation-table columns.

use crate::core::ObservationTable;
use crate::error::Result;

/// Compute a trailing moving average with an expanding warm-up.
///
/// Index `i` holds the mean of the last `window` values ending at `i`;
/// for the first `window - 1` indices the mean runs over everything seen
/// so far instead, so every index is defined. A window of 0 or 1 returns
/// the series unchanged.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return series.to_vec();
    }

    let mut result = Vec::with_capacity(series.len());
    let mut sum = 0.0;
    for (i, &x) in series.iter().enumerate() {
        sum += x;
        if i >= window {
            sum -= series[i - window];
        }
        let count = (i + 1).min(window);
        result.push(sum / count as f64);
    }
    result
}

/// Replace the named columns of a table with their moving averages.
///
/// A window of 0 is a pass-through: the table is returned unchanged.
/// Unknown column names fail with `MissingColumn`.
pub fn smooth_columns(
    table: &ObservationTable,
    columns: &[&str],
    window: usize,
) -> Result<ObservationTable> {
    let mut smoothed = table.clone();
    if window == 0 {
        return Ok(smoothed);
    }
    for name in columns {
        let series = moving_average(table.column(name)?, window);
        smoothed.set_column(name, series)?;
    }
    Ok(smoothed)
}
