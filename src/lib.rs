//! # epicast
//!
//! Epidemic case-rate forecasting library.
//!
//! Provides supervised windowing of per-group observation tables,
//! threshold-based day normalization, social-distancing scenario
//! resolution, and an autoregressive rollout engine that feeds each
//! prediction back into the lag features of later rows.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod models;
pub mod normalize;
pub mod rollout;
pub mod scenario;
pub mod transform;
pub mod utils;

pub use error::{EpicastError, Result};

pub mod prelude {
    pub use crate::core::{FeatureFrame, ObservationTable};
    pub use crate::error::{EpicastError, Result};
    pub use crate::models::Predictor;
    pub use crate::rollout::{Rollout, RolloutConfig, RolloutEngine};
    pub use crate::scenario::{DistancingLevel, Scenario};
    pub use crate::transform::{supervised_frame, WindowConfig};
    pub use crate::utils::{calculate_metrics, AccuracyMetrics};
}
