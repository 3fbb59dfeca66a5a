//! Day normalization: re-anchoring each group's timeline to the day its
//! smoothed case rate crossed a fraction of its peak.
//!
//! Aligning states on "days since crossing" rather than calendar days
//! makes their epidemic curves directly comparable.

use chrono::{DateTime, Duration, Utc};

use crate::core::ObservationTable;
use crate::error::{EpicastError, Result};
use crate::transform::smooth::smooth_columns;

/// Name given to the re-anchored time column.
pub const DAYS_SINCE_START: &str = "days_since_start";

/// Observational plotting capability: receives one curve per group.
///
/// Purely side-effecting; the normalizer consumes no return value.
pub trait CurvePlotter {
    fn plot_curve(&mut self, x: &[f64], y: &[f64], label: &str);
}

/// A plotter that does nothing.
#[derive(Debug, Default)]
pub struct NoopPlotter;

impl CurvePlotter for NoopPlotter {
    fn plot_curve(&mut self, _x: &[f64], _y: &[f64], _label: &str) {}
}

/// One group's day-normalized observations.
#[derive(Debug, Clone)]
pub struct NormalizedGroup {
    /// Group identifier (state name).
    pub group: String,
    /// The time-column value at the threshold crossing; subtracting it
    /// from the original time column produced `days_since_start`.
    pub crossing_day: f64,
    /// The group's table with the smoothed metric and the re-anchored
    /// time column.
    pub table: ObservationTable,
}

impl NormalizedGroup {
    /// Translate the crossing day back to a calendar date, given the
    /// date corresponding to day zero of the original time column.
    pub fn crossing_date(&self, day_zero: DateTime<Utc>) -> DateTime<Utc> {
        day_zero + Duration::days(self.crossing_day.round() as i64)
    }
}

/// Index of the value closest to `target` by absolute difference.
///
/// Ties break to the first occurrence. Returns `None` for an empty slice.
pub fn find_nearest(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        let diff = (v - target).abs();
        match best {
            Some((_, d)) if diff >= d => {}
            _ => best = Some((i, diff)),
        }
    }
    best.map(|(i, _)| i)
}

/// Finds each group's threshold-crossing day and re-anchors its timeline.
#[derive(Debug, Clone)]
pub struct DayNormalizer {
    metric_column: String,
    time_column: String,
    threshold_fraction: f64,
    smoothing_window: usize,
}

impl DayNormalizer {
    /// Create a normalizer for the given metric and time columns, with a
    /// threshold fraction of 0.25 and no smoothing.
    pub fn new(metric_column: &str, time_column: &str) -> Self {
        Self {
            metric_column: metric_column.to_string(),
            time_column: time_column.to_string(),
            threshold_fraction: 0.25,
            smoothing_window: 0,
        }
    }

    /// Set the fraction of the peak used as the crossing threshold.
    pub fn with_threshold_fraction(mut self, fraction: f64) -> Self {
        self.threshold_fraction = fraction;
        self
    }

    /// Set the moving-average window applied to the metric before the
    /// threshold search. 0 means no smoothing.
    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    /// Normalize each named group of `table`.
    ///
    /// Per group: smooth the metric, find the smoothed value nearest to
    /// `peak * threshold_fraction` (ties to first occurrence), read the
    /// time value at the first row carrying that smoothed value, subtract
    /// it from the whole time column, and rename the time column to
    /// [`DAYS_SINCE_START`]. Each group's normalized curve is offered to
    /// the plotter if one is given.
    pub fn normalize(
        &self,
        groups: &[&str],
        table: &ObservationTable,
        mut plotter: Option<&mut dyn CurvePlotter>,
    ) -> Result<Vec<NormalizedGroup>> {
        let mut normalized = Vec::with_capacity(groups.len());

        for &group in groups {
            let raw = table.filter_group(group)?;
            if raw.is_empty() {
                return Err(EpicastError::InvalidParameter(format!(
                    "group {:?} has no rows",
                    group
                )));
            }

            let mut df = smooth_columns(&raw, &[&self.metric_column], self.smoothing_window)?;

            let y = df.column(&self.metric_column)?.to_vec();
            let time = df.column(&self.time_column)?.to_vec();

            let peak = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let threshold = peak * self.threshold_fraction;

            // find_nearest never fails here: the group is non-empty.
            let idx = find_nearest(&y, threshold).ok_or(EpicastError::EmptyData)?;
            let matched = y[idx];
            // Duplicate smoothed values take the first match.
            let first = y
                .iter()
                .position(|&v| v == matched)
                .ok_or(EpicastError::EmptyData)?;
            let crossing_day = time[first];

            let days_since: Vec<f64> = time.iter().map(|&t| t - crossing_day).collect();
            df.set_column(&self.time_column, days_since.clone())?;
            df.rename_column(&self.time_column, DAYS_SINCE_START)?;

            if let Some(p) = plotter.as_deref_mut() {
                p.plot_curve(&days_since, &y, group);
            }

            normalized.push(NormalizedGroup {
                group: group.to_string(),
                crossing_day,
                table: df,
            });
        }

        Ok(normalized)
    }
}
