//! Calculator input and result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};

/// Electricity rate applied when the user leaves it blank (currency/kWh).
pub const DEFAULT_ELECTRICITY_RATE: f64 = 0.18;

fn default_electricity_rate() -> f64 {
    DEFAULT_ELECTRICITY_RATE
}

/// Installation topology. Informational only; the formula ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemType {
    #[default]
    GridTied,
    OffGrid,
    Hybrid,
}

impl SystemType {
    /// Wire names accepted by [`SystemType::from_str`].
    pub const NAMES: &[&str] = &["grid-tied", "off-grid", "hybrid"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GridTied => "grid-tied",
            Self::OffGrid => "off-grid",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid-tied" | "grid_tied" => Ok(Self::GridTied),
            "off-grid" | "off_grid" => Ok(Self::OffGrid),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!(
                "unknown system type \"{other}\", expected one of: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Form data collected by the quote wizard.
///
/// Serialized with camelCase keys, matching the `formData` block of an
/// exported report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    /// Average monthly electricity bill (currency, must be > 0).
    pub monthly_bill: f64,
    /// Usable roof area in m² (must be > 0).
    pub roof_area: f64,
    /// City key looked up in the sun-hours table.
    pub location: String,
    /// Tariff in currency per kWh (must be > 0).
    #[serde(default = "default_electricity_rate")]
    pub electricity_rate: f64,
    #[serde(default)]
    pub system_type: SystemType,
}

impl CalculatorInput {
    /// Creates an input with the default rate and a grid-tied system.
    pub fn new(monthly_bill: f64, roof_area: f64, location: impl Into<String>) -> Self {
        Self {
            monthly_bill,
            roof_area,
            location: location.into(),
            electricity_rate: DEFAULT_ELECTRICITY_RATE,
            system_type: SystemType::default(),
        }
    }

    pub fn with_rate(mut self, electricity_rate: f64) -> Self {
        self.electricity_rate = electricity_rate;
        self
    }

    pub fn with_system_type(mut self, system_type: SystemType) -> Self {
        self.system_type = system_type;
        self
    }

    /// Checks that every required numeric field is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field, in form order.
    pub fn validate(&self) -> Result<()> {
        require_positive("monthlyBill", self.monthly_bill)?;
        require_positive("roofArea", self.roof_area)?;
        require_positive("electricityRate", self.electricity_rate)?;
        Ok(())
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EstimateError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(EstimateError::NonPositive { field, value });
    }
    Ok(())
}

/// Sizing and financial estimate derived from a [`CalculatorInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    /// Recommended array size, rounded up to whole kW.
    #[serde(rename = "systemSize")]
    pub system_size_kw: u32,
    /// Yearly bill reduction (currency).
    #[serde(rename = "annualSavings")]
    pub annual_savings: f64,
    /// Years until savings cover the installation cost.
    #[serde(rename = "paybackPeriod")]
    pub payback_years: f64,
    /// Avoided emissions in tons of CO₂ per year.
    #[serde(rename = "co2Reduction")]
    pub co2_reduction_tons: f64,
    /// Installed cost (currency).
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    /// Installment over the default BNPL term.
    #[serde(rename = "monthlyPayment")]
    pub monthly_payment: f64,
    /// Return over the system lifetime, in percent.
    #[serde(rename = "roiPercentage")]
    pub roi_percentage: f64,
}

impl fmt::Display for CalculatorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Solar Estimate ---")?;
        writeln!(f, "System size:       {} kW", self.system_size_kw)?;
        writeln!(f, "Total cost:        {:.2}", self.total_cost)?;
        writeln!(f, "Annual savings:    {:.2}", self.annual_savings)?;
        writeln!(f, "Payback period:    {:.1} years", self.payback_years)?;
        writeln!(f, "Monthly payment:   {:.2}", self.monthly_payment)?;
        writeln!(f, "CO2 reduction:     {:.2} t/year", self.co2_reduction_tons)?;
        write!(f, "ROI:               {:.1}%", self.roi_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_type_parses_wire_names() {
        for name in SystemType::NAMES {
            let parsed: SystemType = name.parse().expect("wire name should parse");
            assert_eq!(parsed.as_str(), *name);
        }
        assert!("solar-punk".parse::<SystemType>().is_err());
    }

    #[test]
    fn input_json_uses_camel_case_and_defaults() {
        let json = r#"{"monthlyBill": 500, "roofArea": 80, "location": "riyadh"}"#;
        let input: CalculatorInput = serde_json::from_str(json).expect("should parse");
        assert_eq!(input.monthly_bill, 500.0);
        assert_eq!(input.electricity_rate, DEFAULT_ELECTRICITY_RATE);
        assert_eq!(input.system_type, SystemType::GridTied);

        let out = serde_json::to_value(input.with_system_type(SystemType::OffGrid))
            .expect("should serialize");
        assert_eq!(out["systemType"], "off-grid");
        assert!(out.get("roofArea").is_some());
    }

    #[test]
    fn validate_rejects_non_positive_fields() {
        let err = CalculatorInput::new(0.0, 50.0, "riyadh").validate();
        assert_eq!(
            err,
            Err(EstimateError::NonPositive {
                field: "monthlyBill",
                value: 0.0
            })
        );

        let err = CalculatorInput::new(100.0, -1.0, "riyadh").validate();
        assert!(matches!(
            err,
            Err(EstimateError::NonPositive {
                field: "roofArea",
                ..
            })
        ));

        let err = CalculatorInput::new(100.0, 50.0, "riyadh")
            .with_rate(f64::NAN)
            .validate();
        assert_eq!(
            err,
            Err(EstimateError::NonFinite {
                field: "electricityRate"
            })
        );
    }

    #[test]
    fn result_serializes_with_report_field_names() {
        let result = CalculatorResult {
            system_size_kw: 13,
            annual_savings: 6149.88,
            payback_years: 9.5,
            co2_reduction_tons: 17.08,
            total_cost: 58500.0,
            monthly_payment: 2437.5,
            roi_percentage: 162.8,
        };
        let json = serde_json::to_value(&result).expect("should serialize");
        for key in [
            "systemSize",
            "annualSavings",
            "paybackPeriod",
            "co2Reduction",
            "totalCost",
            "monthlyPayment",
            "roiPercentage",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["systemSize"], 13);
    }
}
