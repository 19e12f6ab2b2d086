//! Same household, every city in the table.

use super::calculator::Estimator;
use super::types::{CalculatorInput, CalculatorResult};
use crate::error::Result;

/// Estimate for one location in a comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationEstimate {
    pub location: String,
    pub sun_hours: f64,
    pub result: CalculatorResult,
}

/// Runs `input` once per table entry, replacing only the location.
///
/// Rows are sorted by location key.
///
/// # Errors
///
/// Returns an `EstimateError` if the numeric fields of `input` are invalid.
pub fn compare_locations(
    estimator: &Estimator,
    input: &CalculatorInput,
) -> Result<Vec<LocationEstimate>> {
    input.validate()?;
    estimator
        .sun_hours
        .iter()
        .map(|(key, sun_hours)| {
            let candidate = CalculatorInput {
                location: key.to_string(),
                ..input.clone()
            };
            estimator.compute(&candidate).map(|result| LocationEstimate {
                location: key.to_string(),
                sun_hours,
                result,
            })
        })
        .collect()
}
