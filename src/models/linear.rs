//! Linear regression over dense feature rows.
//!
//! Fits ordinary least squares via the normal equations with a Cholesky
//! solve. This is the crate's reference predictor for rollouts; anything
//! implementing [`Predictor`] works equally well.

use crate::error::{EpicastError, Result};
use crate::models::Predictor;

/// A fitted linear model: `y = intercept + features · coefficients`.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Fit OLS to feature rows and an aligned target series.
    ///
    /// All rows must have the same width; a small ridge term is added to
    /// the normal-equation diagonal for numerical stability.
    pub fn fit(rows: &[Vec<f64>], y: &[f64]) -> Result<Self> {
        let n = y.len();
        if n == 0 {
            return Err(EpicastError::EmptyData);
        }
        if rows.len() != n {
            return Err(EpicastError::DimensionMismatch {
                expected: n,
                got: rows.len(),
            });
        }

        let k = rows[0].len();
        for row in rows {
            if row.len() != k {
                return Err(EpicastError::DimensionMismatch {
                    expected: k,
                    got: row.len(),
                });
            }
        }

        if k == 0 {
            // No features: the mean is the least-squares intercept.
            return Ok(Self {
                coefficients: vec![],
                intercept: y.iter().sum::<f64>() / n as f64,
            });
        }

        // Build X'X and X'y with an implicit leading intercept column.
        let p = k + 1;
        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];

        for (row, &y_obs) in rows.iter().zip(y.iter()) {
            xtx[0][0] += 1.0;
            for j in 0..k {
                xtx[0][j + 1] += row[j];
                xtx[j + 1][0] += row[j];
            }
            for i in 0..k {
                for j in 0..k {
                    xtx[i + 1][j + 1] += row[i] * row[j];
                }
            }
            xty[0] += y_obs;
            for i in 0..k {
                xty[i + 1] += row[i] * y_obs;
            }
        }

        for i in 0..p {
            xtx[i][i] += 1e-8;
        }

        let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
            EpicastError::ComputationError(
                "OLS failed: normal-equation matrix not positive definite".to_string(),
            )
        })?;

        Ok(Self {
            intercept: beta[0],
            coefficients: beta[1..].to_vec(),
        })
    }

    /// Regression coefficients, one per feature column.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Intercept term.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(EpicastError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }

    fn name(&self) -> &str {
        "Linear"
    }
}

/// Solve `A x = b` for symmetric positive definite `A` via Cholesky.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
