//! Regression predictors consumed by the rollout engine.

pub mod baseline;
pub mod linear;
mod traits;

pub use baseline::{ConstantModel, MeanModel};
pub use linear::LinearModel;
pub use traits::{BoxedPredictor, Predictor};
