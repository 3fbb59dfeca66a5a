//! Forecast accuracy metrics.
//!
//! Used to score rollout output against held-out observations. MAPE is
//! undefined when any actual value is zero, so it is reported as an
//! `Option`.

use crate::error::{EpicastError, Result};

/// Accuracy metrics comparing predicted values against actuals.
#[derive(Debug, Clone)]
pub struct AccuracyMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute percentage error. `None` if any actual is zero.
    pub mape: Option<f64>,
    /// Symmetric mean absolute percentage error.
    pub smape: f64,
}

/// Computes accuracy metrics over paired actual and predicted slices.
///
/// Returns an error if the slices are empty or have different lengths.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.is_empty() {
        return Err(EpicastError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(EpicastError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;

    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut pct_sum = 0.0;
    let mut pct_valid = true;
    let mut smape_sum = 0.0;

    for (&a, &p) in actual.iter().zip(predicted.iter()) {
        let err = a - p;
        abs_sum += err.abs();
        sq_sum += err * err;

        if a == 0.0 {
            pct_valid = false;
        } else {
            pct_sum += (err / a).abs();
        }

        let denom = (a.abs() + p.abs()) / 2.0;
        if denom > 0.0 {
            smape_sum += err.abs() / denom;
        }
    }

    let mse = sq_sum / n;
    Ok(AccuracyMetrics {
        mae: abs_sum / n,
        mse,
        rmse: mse.sqrt(),
        mape: if pct_valid {
            Some(pct_sum / n * 100.0)
        } else {
            None
        },
        smape: smape_sum / n * 100.0,
    })
}
