//! Table transformations: supervised windowing and smoothing.
//!
//! # Example
//!
//! ```
//! use epicast::transform::{supervised_series, WindowConfig};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let config = WindowConfig::new(2, 1, true);
//! let frame = supervised_series(&series, "cases", &config).unwrap();
//!
//! assert_eq!(
//!     frame.columns(),
//!     &["cases(t-2)", "cases(t-1)", "cases(t)"]
//! );
//! assert_eq!(frame.n_rows(), 3);
//! ```

pub mod smooth;
pub mod window;

pub use smooth::{moving_average, smooth_columns};
pub use window::{
    lag_column_name, supervised_frame, supervised_series, target_lag_columns, WindowConfig,
};
