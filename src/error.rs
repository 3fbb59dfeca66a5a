//! Error types for the epicast library.

use thiserror::Error;

/// Result type alias for epicast operations.
pub type Result<T> = std::result::Result<T, EpicastError>;

/// Errors that can occur while building feature tables or running rollouts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EpicastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unrecognized social-distancing scenario name.
    #[error("invalid scenario: {0:?} (expected High, Medium, or Low)")]
    InvalidScenario(String),

    /// A column required by the configuration is absent from the table.
    #[error("missing column: {0:?}")]
    MissingColumn(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = EpicastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = EpicastError::InsufficientData { needed: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 10, got 5"
        );

        let err = EpicastError::InvalidScenario("Extreme".to_string());
        assert_eq!(
            err.to_string(),
            "invalid scenario: \"Extreme\" (expected High, Medium, or Low)"
        );

        let err = EpicastError::MissingColumn("New_Cases_per_pop(t-1)".to_string());
        assert_eq!(
            err.to_string(),
            "missing column: \"New_Cases_per_pop(t-1)\""
        );

        let err = EpicastError::DimensionMismatch { expected: 7, got: 5 };
        assert_eq!(err.to_string(), "dimension mismatch: expected 7, got 5");

        let err = EpicastError::IndexOutOfBounds { index: 3, size: 3 };
        assert_eq!(err.to_string(), "index out of bounds: 3 (size: 3)");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = EpicastError::FitRequired;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
