//! Predictor trait defining the contract the rollout engine calls into.

use crate::error::Result;

/// A trained regression model producing one scalar per feature row.
///
/// The rollout engine hands the predictor dense rows shaped exactly like
/// the feature frame's columns (undefined cells presented as `0.0`).
/// This trait is object-safe and can be used with `Box<dyn Predictor>`.
pub trait Predictor {
    /// Predict the target for one feature row.
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Get the model name.
    fn name(&self) -> &str;
}

/// Type alias for boxed predictor trait objects.
pub type BoxedPredictor = Box<dyn Predictor>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConstantModel;

    #[test]
    fn boxed_predictor_is_usable() {
        let model: BoxedPredictor = Box::new(ConstantModel::new(3.0));
        assert_eq!(model.name(), "Constant");
        assert_eq!(model.predict(&[1.0, 2.0]).unwrap(), 3.0);
    }
}
