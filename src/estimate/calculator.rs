//! Solar sizing and savings formula.
//!
//! The pipeline is a single pass:
//!
//! 1. monthly consumption = bill / rate
//! 2. daily consumption = monthly / 30
//! 3. system size = ceil(daily / sun hours)
//! 4. cost = size × cost per kW
//! 5. annual production = size × sun hours × 365
//! 6. annual savings = production × rate
//! 7. payback = cost / savings
//! 8. monthly payment = cost / BNPL term
//! 9. CO₂ reduction = production × factor / 1000
//! 10. ROI = (savings × lifetime − cost) / cost × 100

use tracing::{debug, warn};

use super::location::{SunHours, SunHoursTable};
use super::types::{CalculatorInput, CalculatorResult};
use crate::error::{EstimateError, Result};

/// Billing days per month used to turn a bill into daily consumption.
pub const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;
const KG_PER_TON: f64 = 1000.0;

/// Pricing and impact constants applied by the formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    /// Installed cost per kW of capacity (currency).
    pub cost_per_kw: f64,
    /// Grid emission factor (kg CO₂ per kWh).
    pub co2_kg_per_kwh: f64,
    /// Horizon for the ROI figure (years).
    pub lifetime_years: u32,
    /// Term used for the canonical `monthly_payment` (months).
    pub bnpl_term_months: u32,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            cost_per_kw: 4500.0,
            co2_kg_per_kwh: 0.5,
            lifetime_years: 25,
            bnpl_term_months: 24,
        }
    }
}

/// Full estimate including the intermediate energy figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub sun_hours: SunHours,
    pub monthly_consumption_kwh: f64,
    pub daily_consumption_kwh: f64,
    pub annual_production_kwh: f64,
    pub result: CalculatorResult,
}

/// Applies the sizing formula with a fixed set of assumptions and sun-hours.
///
/// Holds no mutable state: identical inputs always yield identical results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    pub assumptions: Assumptions,
    pub sun_hours: SunHoursTable,
}

impl Estimator {
    pub fn new(assumptions: Assumptions, sun_hours: SunHoursTable) -> Self {
        Self {
            assumptions,
            sun_hours,
        }
    }

    /// Standard constants and the built-in city table.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Computes the recommended system and its financials.
    ///
    /// # Errors
    ///
    /// Returns an `EstimateError` if the bill, roof area or rate is not a
    /// positive finite number, or if the bill/rate ratio asks for a system
    /// larger than `u32::MAX` kW. Unknown locations do not fail.
    pub fn compute(&self, input: &CalculatorInput) -> Result<CalculatorResult> {
        self.compute_detailed(input).map(|e| e.result)
    }

    /// Like [`Estimator::compute`], also returning consumption and
    /// production figures.
    ///
    /// # Errors
    ///
    /// Same as [`Estimator::compute`].
    pub fn compute_detailed(&self, input: &CalculatorInput) -> Result<Estimate> {
        input.validate()?;

        let sun_hours = self.sun_hours.lookup(&input.location);
        if !sun_hours.matched {
            warn!(
                location = %input.location,
                fallback = sun_hours.hours,
                "unknown location, using default sun hours"
            );
        }

        let a = &self.assumptions;
        let rate = input.electricity_rate;

        let monthly_consumption_kwh = input.monthly_bill / rate;
        let daily_consumption_kwh = monthly_consumption_kwh / DAYS_PER_MONTH;
        let system_size_kw = size_to_kw(daily_consumption_kwh / sun_hours.hours)?;
        let size = f64::from(system_size_kw);

        let total_cost = size * a.cost_per_kw;
        let annual_production_kwh = size * sun_hours.hours * DAYS_PER_YEAR;
        let annual_savings = annual_production_kwh * rate;
        let payback_years = total_cost / annual_savings;
        let monthly_payment = total_cost / f64::from(a.bnpl_term_months);
        let co2_reduction_tons = annual_production_kwh * a.co2_kg_per_kwh / KG_PER_TON;
        let lifetime_savings = annual_savings * f64::from(a.lifetime_years);
        let roi_percentage = (lifetime_savings - total_cost) / total_cost * 100.0;

        debug!(
            location = %input.location,
            system_size_kw,
            total_cost,
            annual_savings,
            "computed solar estimate"
        );

        Ok(Estimate {
            sun_hours,
            monthly_consumption_kwh,
            daily_consumption_kwh,
            annual_production_kwh,
            result: CalculatorResult {
                system_size_kw,
                annual_savings,
                payback_years,
                co2_reduction_tons,
                total_cost,
                monthly_payment,
                roi_percentage,
            },
        })
    }
}

/// Rounds the required capacity up to whole kW, rejecting sizes that do not
/// fit in `u32`.
fn size_to_kw(need_kw: f64) -> Result<u32> {
    let size = need_kw.ceil();
    if !size.is_finite() {
        return Err(EstimateError::NonFinite {
            field: "systemSize",
        });
    }
    let max = f64::from(u32::MAX);
    if size > max {
        return Err(EstimateError::OutOfRange {
            field: "systemSize",
            value: size,
            max,
        });
    }
    Ok(size as u32)
}

/// Computes an estimate with the standard constants and city table.
///
/// # Examples
///
/// ```
/// use solar_quote::estimate::{CalculatorInput, compute};
///
/// let result = compute(&CalculatorInput::new(500.0, 100.0, "riyadh")).unwrap();
/// assert_eq!(result.system_size_kw, 13);
/// assert_eq!(result.total_cost, 13.0 * 4500.0);
/// ```
///
/// # Errors
///
/// Returns an `EstimateError` for non-positive or non-finite numeric inputs.
pub fn compute(input: &CalculatorInput) -> Result<CalculatorResult> {
    Estimator::standard().compute(input)
}
