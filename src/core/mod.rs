//! Core data structures for windowed case-rate forecasting.

mod frame;
mod table;

pub use frame::FeatureFrame;
pub use table::ObservationTable;
