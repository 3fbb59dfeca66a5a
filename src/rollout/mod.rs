//! Autoregressive rollout: recursive multi-step forecasting.

mod engine;

pub use engine::{Rollout, RolloutConfig, RolloutEngine};
