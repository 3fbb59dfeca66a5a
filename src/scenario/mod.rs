//! Social-distancing scenario parameters.
//!
//! A scenario maps a named severity level (or an explicit vector) to the
//! seven mobility-index multipliers used to synthesize future exogenous
//! rows during a rollout.

use std::str::FromStr;

use crate::error::{EpicastError, Result};

/// The mobility-index columns a scenario vector applies to, in resolver
/// order.
pub const MOBILITY_COLUMNS: [&str; 7] = [
    "retail_and_recreation",
    "grocery_and_pharmacy",
    "parks",
    "transit_stations",
    "workplaces",
    "residential",
    "driving",
];

/// Number of mobility multipliers in a scenario vector.
pub const SCENARIO_LEN: usize = MOBILITY_COLUMNS.len();

/// A named social-distancing severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistancingLevel {
    High,
    Medium,
    Low,
}

impl FromStr for DistancingLevel {
    type Err = EpicastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(EpicastError::InvalidScenario(other.to_string())),
        }
    }
}

impl DistancingLevel {
    /// The fixed multiplier vector for this level.
    pub fn multipliers(self) -> [f64; SCENARIO_LEN] {
        match self {
            Self::High => [0.34, 0.5, 0.36, 0.295, 0.4, 1.3, 0.385],
            Self::Medium => [0.6, 0.8, 0.7, 0.7, 0.75, 1.1, 0.7],
            Self::Low => [1.0, 1.0, 1.0, 1.0, 1.0, 0.9, 1.0],
        }
    }
}

/// A scenario: either a named severity level or an explicit multiplier
/// vector in [`MOBILITY_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    Named(DistancingLevel),
    Custom([f64; SCENARIO_LEN]),
}

impl Scenario {
    /// Parse a named level; an unrecognized name fails with
    /// [`EpicastError::InvalidScenario`].
    pub fn parse(level: &str) -> Result<Self> {
        Ok(Self::Named(level.parse()?))
    }

    /// Build a custom scenario from an explicit vector, which must have
    /// exactly [`SCENARIO_LEN`] entries.
    pub fn custom(params: &[f64]) -> Result<Self> {
        let params: [f64; SCENARIO_LEN] =
            params
                .try_into()
                .map_err(|_| EpicastError::DimensionMismatch {
                    expected: SCENARIO_LEN,
                    got: params.len(),
                })?;
        Ok(Self::Custom(params))
    }

    /// Resolve to the 7-element multiplier vector. Pure; no side effects.
    pub fn resolve(&self) -> [f64; SCENARIO_LEN] {
        match self {
            Self::Named(level) => level.multipliers(),
            Self::Custom(params) => *params,
        }
    }
}
