//! Three-step quote form with required-field gating.
//!
//! A step can only be left once its required fields hold positive values;
//! [`InputDraft::finish`] re-checks every step before producing an input.

use std::fmt;

use crate::error::{EstimateError, Result};
use crate::estimate::types::{
    CalculatorInput, DEFAULT_ELECTRICITY_RATE, SystemType, require_positive,
};

/// Wizard page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    EnergyUsage,
    Property,
    Location,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::EnergyUsage, Step::Property, Step::Location];

    /// The following step, or `None` after the last one.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::EnergyUsage => Some(Step::Property),
            Step::Property => Some(Step::Location),
            Step::Location => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::EnergyUsage => "energy usage",
            Step::Property => "property",
            Step::Location => "location",
        };
        f.write_str(name)
    }
}

/// Partially completed form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDraft {
    pub monthly_bill: Option<f64>,
    /// Blank means the default tariff.
    pub electricity_rate: Option<f64>,
    pub roof_area: Option<f64>,
    pub system_type: Option<SystemType>,
    pub location: Option<String>,
}

impl InputDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Problems blocking progression past `step`, in form order.
    pub fn missing_for(&self, step: Step) -> Vec<EstimateError> {
        let mut errors = Vec::new();
        match step {
            Step::EnergyUsage => {
                check_required(&mut errors, "monthlyBill", self.monthly_bill);
                if let Some(rate) = self.electricity_rate {
                    if let Err(e) = require_positive("electricityRate", rate) {
                        errors.push(e);
                    }
                }
            }
            Step::Property => check_required(&mut errors, "roofArea", self.roof_area),
            Step::Location => {
                let blank = self.location.as_deref().is_none_or(|l| l.trim().is_empty());
                if blank {
                    errors.push(EstimateError::MissingField { field: "location" });
                }
            }
        }
        errors
    }

    /// Whether the "Next" control for `step` should be enabled.
    pub fn can_advance(&self, step: Step) -> bool {
        self.missing_for(step).is_empty()
    }

    /// First step that still has blocking fields.
    pub fn first_incomplete(&self) -> Option<Step> {
        Step::ALL.into_iter().find(|&s| !self.can_advance(s))
    }

    /// Validates every step and builds the calculator input.
    ///
    /// # Errors
    ///
    /// Returns the first blocking problem of the earliest incomplete step.
    pub fn finish(&self) -> Result<CalculatorInput> {
        for step in Step::ALL {
            if let Some(err) = self.missing_for(step).into_iter().next() {
                return Err(err);
            }
        }
        let monthly_bill = required(self.monthly_bill, "monthlyBill")?;
        let roof_area = required(self.roof_area, "roofArea")?;
        let location = required(self.location.as_deref(), "location")?;
        Ok(CalculatorInput {
            monthly_bill,
            roof_area,
            location: location.trim().to_string(),
            electricity_rate: self.electricity_rate.unwrap_or(DEFAULT_ELECTRICITY_RATE),
            system_type: self.system_type.unwrap_or_default(),
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(EstimateError::MissingField { field })
}

fn check_required(errors: &mut Vec<EstimateError>, field: &'static str, value: Option<f64>) {
    match value {
        None => errors.push(EstimateError::MissingField { field }),
        Some(v) => {
            if let Err(e) = require_positive(field, v) {
                errors.push(e);
            }
        }
    }
}
