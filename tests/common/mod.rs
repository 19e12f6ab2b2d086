//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_quote::estimate::location::CITIES;
use solar_quote::estimate::{CalculatorInput, Estimator};

/// The reference household: 500/month bill at 0.18/kWh in Riyadh, 100 m² roof.
pub fn riyadh_household() -> CalculatorInput {
    CalculatorInput::new(500.0, 100.0, "riyadh").with_rate(0.18)
}

/// Estimator with the standard constants and built-in cities.
pub fn standard_estimator() -> Estimator {
    Estimator::standard()
}

/// Keys of every built-in city.
pub fn city_keys() -> Vec<&'static str> {
    CITIES.iter().map(|c| c.key).collect()
}
