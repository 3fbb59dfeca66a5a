//! The rollout engine: synthesizes future exogenous rows, seeds known
//! lag values, then predicts one day at a time, feeding each prediction
//! back into the lag columns subsequent rows read from.

use crate::core::FeatureFrame;
use crate::error::{EpicastError, Result};
use crate::models::Predictor;
use crate::scenario::{Scenario, MOBILITY_COLUMNS};
use crate::transform::window::{lag_column_name, target_lag_columns};

/// Configuration for a rollout.
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of future days to predict.
    pub horizon: usize,
    /// Base name of the target metric whose lag columns drive the
    /// autoregression (e.g. `New_Cases_per_pop`). Always explicit: the
    /// engine never guesses between alternate metric names.
    pub target_column: String,
    /// Base name of the day-counter column.
    pub day_column: String,
    /// Base name of the population-density column.
    pub density_column: String,
}

impl RolloutConfig {
    /// Config with the standard column names and a 21-day horizon.
    pub fn new(target_column: &str) -> Self {
        Self {
            horizon: 21,
            target_column: target_column.to_string(),
            day_column: "days_elapsed".to_string(),
            density_column: "pop_density".to_string(),
        }
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }
}

/// The product of one rollout: the extended feature frame with lag
/// columns populated, and the sequential target values (observed history
/// followed by predictions), one per frame row.
#[derive(Debug, Clone)]
pub struct Rollout {
    pub frame: FeatureFrame,
    pub predictions: Vec<f64>,
}

/// Runs autoregressive rollouts over windowed feature frames.
///
/// The engine owns no state between calls; each call consumes a frame,
/// mutates it in place, and hands it back inside [`Rollout`]. Callers
/// that need the original frame should clone it first.
#[derive(Debug, Clone)]
pub struct RolloutEngine {
    config: RolloutConfig,
}

impl RolloutEngine {
    pub fn new(config: RolloutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Roll the frame `horizon` days into the future.
    ///
    /// `frame` is the windowed history (current/past lags only) and
    /// `history_y` the observed target, aligned row-for-row. The returned
    /// prediction list has one entry per row of the extended frame:
    /// history first, then one prediction per synthesized day, with a
    /// final extra prediction computed from exactly the last row.
    ///
    /// Late-horizon rows may keep undefined far-lag cells: once a
    /// diagonal write would land beyond the last row it is skipped, and
    /// nothing back-fills the far lags of the rows near the edge. Those
    /// cells are presented to the predictor as zero.
    pub fn run(
        &self,
        scenario: &Scenario,
        mut frame: FeatureFrame,
        history_y: &[f64],
        model: &dyn Predictor,
    ) -> Result<Rollout> {
        if frame.is_empty() {
            return Err(EpicastError::EmptyData);
        }
        let &last_observed = history_y.last().ok_or(EpicastError::EmptyData)?;
        if history_y.len() != frame.n_rows() {
            return Err(EpicastError::DimensionMismatch {
                expected: frame.n_rows(),
                got: history_y.len(),
            });
        }

        // Resolve every column position once; all addressing below is
        // positional.
        let day_col = frame.column_index(&lag_column_name(&self.config.day_column, 0))?;
        let density_col = frame.column_index(&lag_column_name(&self.config.density_column, 0))?;
        let mobility_cols: Vec<usize> = MOBILITY_COLUMNS
            .iter()
            .map(|base| frame.column_index(&lag_column_name(base, 0)))
            .collect::<Result<_>>()?;

        let lags = target_lag_columns(frame.columns(), &self.config.target_column);
        let lag_positions: Vec<usize> = lags.iter().map(|&(idx, _)| idx).collect();
        match lags.last() {
            // The nearest lag must be t-1; seeding and the diagonal walk
            // count on it.
            Some(&(_, 1)) => {}
            _ => {
                return Err(EpicastError::MissingColumn(lag_column_name(
                    &self.config.target_column,
                    -1,
                )))
            }
        }
        let n_lags = lag_positions.len();
        let nearest_lag = lag_positions[n_lags - 1];

        // Phase 1: synthesize future exogenous rows. Mobility multipliers
        // are held constant across the horizon and density repeats the
        // modal historical value.
        let params = scenario.resolve();
        let last_day = frame
            .column_cells(day_col)?
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if !last_day.is_finite() {
            return Err(EpicastError::InvalidParameter(format!(
                "column {:?} has no defined values",
                lag_column_name(&self.config.day_column, 0)
            )));
        }
        let density = mode_first_seen(&frame.column_cells(density_col)?).ok_or_else(|| {
            EpicastError::InvalidParameter(format!(
                "column {:?} has no defined values",
                lag_column_name(&self.config.density_column, 0)
            ))
        })?;

        let width = frame.n_columns();
        for step in 1..=self.config.horizon {
            let mut row = vec![None; width];
            row[day_col] = Some(last_day + step as f64);
            for (&col, &value) in mobility_cols.iter().zip(params.iter()) {
                row[col] = Some(value);
            }
            row[density_col] = Some(density);
            frame.push_row(row)?;
        }

        let n_rows = frame.n_rows();

        // Phase 2: seed known lags. The first row with an undefined
        // nearest-lag cell starts the synthetic region; its t-1 slot is
        // the last observed target, and every known value then walks
        // diagonally forward (day t's t-1 is day t+1's t-2, and so on).
        let row_start = frame
            .column_cells(nearest_lag)?
            .iter()
            .position(|cell| cell.is_none())
            .unwrap_or(n_rows);

        if row_start < n_rows {
            frame.set(row_start, nearest_lag, Some(last_observed))?;
            for row in row_start..n_rows {
                if row == 0 {
                    // No predecessor to copy from.
                    continue;
                }
                for k in 0..n_lags - 1 {
                    let value = frame.get(row - 1, lag_positions[k + 1])?;
                    frame.set(row, lag_positions[k], value)?;
                }
            }
        }

        // Phase 3: autoregressive prediction. Each prediction is written
        // along the diagonal of positions it occupies as a lag for later
        // rows, nearest lag first, never overwriting a defined cell, and
        // stopping at the table edge.
        let mut predictions: Vec<f64> = history_y.to_vec();
        for row in row_start..n_rows {
            let features = frame.row_dense(row)?;
            let pred = model.predict(&features)?;
            predictions.push(pred);

            let mut offset = 0;
            for k in (1..n_lags).rev() {
                let target_row = row + offset;
                if target_row >= n_rows {
                    break;
                }
                if frame.get(target_row, lag_positions[k])?.is_none() {
                    frame.set(target_row, lag_positions[k], Some(pred))?;
                }
                offset += 1;
            }
        }

        // One final prediction from exactly the last row.
        let features = frame.row_dense(n_rows - 1)?;
        predictions.push(model.predict(&features)?);

        // Return the trailing n_rows entries, discarding any leading
        // history duplication.
        if predictions.len() > n_rows {
            predictions.drain(..predictions.len() - n_rows);
        }

        Ok(Rollout { frame, predictions })
    }
}

/// Most frequent defined value; ties go to the value seen first.
fn mode_first_seen(cells: &[Option<f64>]) -> Option<f64> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &value in cells.iter().flatten() {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(f64, usize)> = None;
    for &(value, count) in &counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConstantModel;
    use approx::assert_relative_eq;

    const TARGET: &str = "New_Cases_per_pop";

    /// Columns: 3 target lags, then day, 7 mobility columns, density.
    fn frame_columns(n_lags: usize) -> Vec<String> {
        let mut columns: Vec<String> = (0..n_lags)
            .rev()
            .map(|k| lag_column_name(TARGET, -((k + 1) as i64)))
            .collect();
        columns.push(lag_column_name("days_elapsed", 0));
        for base in MOBILITY_COLUMNS {
            columns.push(lag_column_name(base, 0));
        }
        columns.push(lag_column_name("pop_density", 0));
        columns
    }

    /// History frame whose target series is 10, 20, 30, ... so every lag
    /// cell is easy to recognize.
    fn history_frame(n_rows: usize, n_lags: usize) -> (FeatureFrame, Vec<f64>) {
        let columns = frame_columns(n_lags);
        let mut frame = FeatureFrame::new(columns);
        let target = |i: i64| (i * 10) as f64;

        for r in 0..n_rows {
            let mut row: Vec<Option<f64>> = Vec::new();
            for k in (0..n_lags).rev() {
                // Row r's t-(k+1) lag.
                row.push(Some(target(r as i64 - k as i64 + n_lags as i64 - 1)));
            }
            row.push(Some(r as f64)); // days_elapsed(t)
            row.extend([Some(1.0); 7]); // mobility indices
            row.push(Some(5.0)); // pop_density(t)
            frame.push_row(row).unwrap();
        }

        let history_y: Vec<f64> = (0..n_rows)
            .map(|r| target(r as i64 + n_lags as i64))
            .collect();
        (frame, history_y)
    }

    fn engine(horizon: usize) -> RolloutEngine {
        RolloutEngine::new(RolloutConfig::new(TARGET).with_horizon(horizon))
    }

    #[test]
    fn rollout_output_length_is_history_plus_horizon() {
        let (frame, history_y) = history_frame(8, 3);
        let scenario = Scenario::parse("High").unwrap();
        let model = ConstantModel::new(5.0);

        let rollout = engine(4).run(&scenario, frame, &history_y, &model).unwrap();

        assert_eq!(rollout.frame.n_rows(), 8 + 4);
        assert_eq!(rollout.predictions.len(), 8 + 4);
    }

    #[test]
    fn synthesized_days_increase_by_one() {
        let (frame, history_y) = history_frame(6, 3);
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(1.0);

        let rollout = engine(5).run(&scenario, frame, &history_y, &model).unwrap();

        let day_col = rollout
            .frame
            .column_index("days_elapsed(t)")
            .unwrap();
        // History ends at day 5; synthetic days are 6..=10.
        for (i, row) in (6..11).enumerate() {
            assert_eq!(
                rollout.frame.get(row, day_col).unwrap(),
                Some(6.0 + i as f64)
            );
        }
    }

    #[test]
    fn scenario_multipliers_fill_future_mobility_columns() {
        let (frame, history_y) = history_frame(6, 3);
        let scenario = Scenario::parse("High").unwrap();
        let params = scenario.resolve();
        let model = ConstantModel::new(1.0);

        let rollout = engine(2).run(&scenario, frame, &history_y, &model).unwrap();

        for (i, base) in MOBILITY_COLUMNS.iter().enumerate() {
            let col = rollout
                .frame
                .column_index(&lag_column_name(base, 0))
                .unwrap();
            // Constant across the whole horizon.
            assert_eq!(rollout.frame.get(6, col).unwrap(), Some(params[i]));
            assert_eq!(rollout.frame.get(7, col).unwrap(), Some(params[i]));
        }
    }

    #[test]
    fn future_density_repeats_modal_history_value() {
        let (mut frame, history_y) = history_frame(6, 3);
        let density_col = frame.column_index("pop_density(t)").unwrap();
        // Make 7.0 the most frequent value.
        for row in 0..4 {
            frame.set(row, density_col, Some(7.0)).unwrap();
        }

        let scenario = Scenario::parse("Medium").unwrap();
        let model = ConstantModel::new(1.0);
        let rollout = engine(2).run(&scenario, frame, &history_y, &model).unwrap();

        assert_eq!(rollout.frame.get(6, density_col).unwrap(), Some(7.0));
        assert_eq!(rollout.frame.get(7, density_col).unwrap(), Some(7.0));
    }

    #[test]
    fn density_mode_tie_takes_first_seen_value() {
        let cells = vec![Some(5.0), Some(7.0), Some(5.0), Some(7.0), None];
        assert_eq!(mode_first_seen(&cells), Some(5.0));
        assert_eq!(mode_first_seen(&[None, None]), None);
        assert_eq!(mode_first_seen(&[]), None);
    }

    #[test]
    fn seed_and_diagonal_copy_propagate_known_lags() {
        let (frame, history_y) = history_frame(4, 3);
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(9.0);

        let rollout = engine(3).run(&scenario, frame, &history_y, &model).unwrap();
        let f = &rollout.frame;
        let t3 = f.column_index("New_Cases_per_pop(t-3)").unwrap();
        let t2 = f.column_index("New_Cases_per_pop(t-2)").unwrap();
        let t1 = f.column_index("New_Cases_per_pop(t-1)").unwrap();

        // Last history row (3) holds lags 30, 40, 50; history_y ends 60.
        assert_eq!(f.get(3, t3).unwrap(), Some(30.0));
        assert_eq!(f.get(3, t1).unwrap(), Some(50.0));

        // First synthetic row: seeded t-1 plus diagonally copied history.
        assert_eq!(f.get(4, t1).unwrap(), Some(60.0));
        assert_eq!(f.get(4, t2).unwrap(), Some(50.0));
        assert_eq!(f.get(4, t3).unwrap(), Some(40.0));

        // Known values keep walking the diagonal.
        assert_eq!(f.get(5, t2).unwrap(), Some(60.0));
        assert_eq!(f.get(5, t3).unwrap(), Some(50.0));
        assert_eq!(f.get(6, t3).unwrap(), Some(60.0));
    }

    #[test]
    fn predictions_feed_back_into_later_lag_cells() {
        let (frame, history_y) = history_frame(4, 3);
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(9.0);

        let rollout = engine(3).run(&scenario, frame, &history_y, &model).unwrap();
        let f = &rollout.frame;
        let t2 = f.column_index("New_Cases_per_pop(t-2)").unwrap();
        let t1 = f.column_index("New_Cases_per_pop(t-1)").unwrap();

        // Rows past the seed read earlier predictions as their lags.
        assert_eq!(f.get(5, t1).unwrap(), Some(9.0));
        assert_eq!(f.get(6, t1).unwrap(), Some(9.0));
        assert_eq!(f.get(6, t2).unwrap(), Some(9.0));
    }

    #[test]
    fn late_horizon_far_lags_stay_undefined() {
        // With 3 lag columns the diagonal writes reach only two rows
        // ahead; far lags of rows deep in the horizon are never filled.
        let (frame, history_y) = history_frame(4, 3);
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(9.0);

        let rollout = engine(5).run(&scenario, frame, &history_y, &model).unwrap();
        let f = &rollout.frame;
        let t3 = f.column_index("New_Cases_per_pop(t-3)").unwrap();

        // row_start = 4; rows 7 and 8 are beyond the seeded diagonal.
        assert_eq!(f.get(7, t3).unwrap(), None);
        assert_eq!(f.get(8, t3).unwrap(), None);
        // The predictor saw those cells as zero.
        let dense = f.row_dense(7).unwrap();
        assert_eq!(dense[t3], 0.0);
    }

    #[test]
    fn constant_predictor_fills_rollout_tail() {
        let (frame, history_y) = history_frame(40, 3);
        let scenario = Scenario::parse("High").unwrap();
        let model = ConstantModel::new(5.0);

        let rollout = engine(10).run(&scenario, frame, &history_y, &model).unwrap();

        assert!(rollout.predictions.len() >= 40);
        let n = rollout.predictions.len();
        // The 10 rollout entries before the final extra prediction.
        for &p in &rollout.predictions[n - 11..n - 1] {
            assert_relative_eq!(p, 5.0, epsilon = 1e-12);
        }
        // The final extra prediction from the last row.
        assert_relative_eq!(rollout.predictions[n - 1], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_horizon_only_appends_final_prediction() {
        let (frame, history_y) = history_frame(5, 3);
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(2.0);

        let rollout = engine(0).run(&scenario, frame, &history_y, &model).unwrap();

        assert_eq!(rollout.frame.n_rows(), 5);
        assert_eq!(rollout.predictions.len(), 5);
        // Trailing slice keeps the final extra prediction and drops the
        // oldest history entry.
        assert_eq!(rollout.predictions[4], 2.0);
        assert_eq!(rollout.predictions[0], history_y[1]);
    }

    #[test]
    fn missing_target_lag_column_fails() {
        let columns = vec![
            lag_column_name("days_elapsed", 0),
            lag_column_name("retail_and_recreation", 0),
        ];
        let mut frame = FeatureFrame::new(columns);
        frame.push_row(vec![Some(0.0), Some(1.0)]).unwrap();

        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(1.0);
        let result = engine(2).run(&scenario, frame, &[1.0], &model);

        assert!(matches!(result, Err(EpicastError::MissingColumn(_))));
    }

    #[test]
    fn misaligned_history_fails() {
        let (frame, _) = history_frame(6, 3);
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(1.0);

        let result = engine(2).run(&scenario, frame, &[1.0, 2.0], &model);
        assert!(matches!(
            result,
            Err(EpicastError::DimensionMismatch { expected: 6, got: 2 })
        ));
    }

    #[test]
    fn empty_inputs_fail() {
        let frame = FeatureFrame::new(frame_columns(3));
        let scenario = Scenario::parse("Low").unwrap();
        let model = ConstantModel::new(1.0);

        let result = engine(2).run(&scenario, frame, &[], &model);
        assert!(matches!(result, Err(EpicastError::EmptyData)));
    }
}
