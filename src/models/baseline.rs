//! Baseline predictors for smoke tests and benchmarks.

use crate::error::{EpicastError, Result};
use crate::models::Predictor;

/// Predicts the same fixed value for every row.
#[derive(Debug, Clone, Copy)]
pub struct ConstantModel {
    value: f64,
}

impl ConstantModel {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Predictor for ConstantModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "Constant"
    }
}

/// Predicts the mean of the targets it was fitted on.
#[derive(Debug, Clone, Copy)]
pub struct MeanModel {
    mean: f64,
}

impl MeanModel {
    /// Fit to a target series.
    pub fn fit(y: &[f64]) -> Result<Self> {
        if y.is_empty() {
            return Err(EpicastError::EmptyData);
        }
        Ok(Self {
            mean: y.iter().sum::<f64>() / y.len() as f64,
        })
    }
}

impl Predictor for MeanModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.mean)
    }

    fn name(&self) -> &str {
        "Mean"
    }
}
