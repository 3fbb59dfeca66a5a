//! Utility functions for evaluating rollout output.

pub mod metrics;

pub use metrics::{calculate_metrics, AccuracyMetrics};
