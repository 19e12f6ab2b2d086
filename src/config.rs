//! TOML-based calculator configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::estimate::calculator::{Assumptions, Estimator};
use crate::estimate::financing::DEFAULT_TERMS_MONTHS;
use crate::estimate::location::{CITIES, DEFAULT_SUN_HOURS, SunHoursTable, normalize_key};
use crate::estimate::roof::DEFAULT_AREA_PER_KW_M2;

/// Top-level configuration parsed from TOML.
///
/// Every section is optional and defaults to the standard constants. Load
/// with [`CalculatorConfig::from_toml_file`] or use
/// [`CalculatorConfig::standard`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Installation pricing and ROI horizon.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// BNPL terms.
    #[serde(default)]
    pub financing: FinancingConfig,
    /// Emission factor.
    #[serde(default)]
    pub impact: ImpactConfig,
    /// Sun-hours table.
    #[serde(default)]
    pub locations: LocationsConfig,
    /// Roof footprint.
    #[serde(default)]
    pub roof: RoofConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Installed cost per kW (must be > 0).
    pub cost_per_kw: f64,
    /// ROI horizon in years (must be > 0).
    pub lifetime_years: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let a = Assumptions::default();
        Self {
            cost_per_kw: a.cost_per_kw,
            lifetime_years: a.lifetime_years,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancingConfig {
    /// Term behind the headline monthly payment (must be > 0).
    pub default_term_months: u32,
    /// Terms listed as installment options.
    pub terms_months: Vec<u32>,
}

impl Default for FinancingConfig {
    fn default() -> Self {
        Self {
            default_term_months: Assumptions::default().bnpl_term_months,
            terms_months: DEFAULT_TERMS_MONTHS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImpactConfig {
    /// kg CO₂ avoided per kWh produced (must be >= 0).
    pub co2_kg_per_kwh: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            co2_kg_per_kwh: Assumptions::default().co2_kg_per_kwh,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationsConfig {
    /// Sun hours for locations missing from the table.
    pub default_sun_hours: f64,
    /// Start from the built-in city catalog.
    pub include_builtin: bool,
    /// Extra or overriding entries, keyed by city.
    pub sun_hours: BTreeMap<String, f64>,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            default_sun_hours: DEFAULT_SUN_HOURS,
            include_builtin: true,
            sun_hours: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoofConfig {
    /// Panel footprint per kW (m², must be > 0).
    pub area_per_kw_m2: f64,
}

impl Default for RoofConfig {
    fn default() -> Self {
        Self {
            area_per_kw_m2: DEFAULT_AREA_PER_KW_M2,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"pricing.cost_per_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

impl CalculatorConfig {
    /// Standard constants and the built-in city table.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// City keys in `[locations.sun_hours]` that differ only in case or
    /// surrounding whitespace are reported as duplicates.
    ///
    /// # Returns
    ///
    /// An empty vector if the configuration is valid, otherwise one
    /// [`ConfigError`] per violated constraint.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.pricing;
        if !is_positive(p.cost_per_kw) {
            errors.push(ConfigError::new("pricing.cost_per_kw", "must be > 0"));
        }
        if p.lifetime_years == 0 {
            errors.push(ConfigError::new("pricing.lifetime_years", "must be > 0"));
        }

        let f = &self.financing;
        if f.default_term_months == 0 {
            errors.push(ConfigError::new("financing.default_term_months", "must be > 0"));
        }
        if f.terms_months.contains(&0) {
            errors.push(ConfigError::new(
                "financing.terms_months",
                "every term must be > 0",
            ));
        }

        let co2 = self.impact.co2_kg_per_kwh;
        if !co2.is_finite() || co2 < 0.0 {
            errors.push(ConfigError::new("impact.co2_kg_per_kwh", "must be >= 0"));
        }

        let l = &self.locations;
        if !is_positive(l.default_sun_hours) {
            errors.push(ConfigError::new("locations.default_sun_hours", "must be > 0"));
        }
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for (city, &hours) in &l.sun_hours {
            let key = normalize_key(city);
            if let Some(first) = seen.get(&key) {
                errors.push(ConfigError::new(
                    format!("locations.sun_hours.{key}"),
                    format!("\"{first}\" and \"{city}\" name the same city"),
                ));
            } else {
                seen.insert(key, city.as_str());
            }
            if city.trim().is_empty() {
                errors.push(ConfigError::new(
                    "locations.sun_hours",
                    "city keys must not be blank",
                ));
            }
            if !is_positive(hours) {
                errors.push(ConfigError::new(
                    format!("locations.sun_hours.{city}"),
                    "must be > 0",
                ));
            }
        }
        if !l.include_builtin && l.sun_hours.is_empty() {
            errors.push(ConfigError::new(
                "locations.sun_hours",
                "must list at least one city when include_builtin = false",
            ));
        }

        if !is_positive(self.roof.area_per_kw_m2) {
            errors.push(ConfigError::new("roof.area_per_kw_m2", "must be > 0"));
        }

        errors
    }

    /// Formula constants described by this configuration.
    pub fn assumptions(&self) -> Assumptions {
        Assumptions {
            cost_per_kw: self.pricing.cost_per_kw,
            co2_kg_per_kwh: self.impact.co2_kg_per_kwh,
            lifetime_years: self.pricing.lifetime_years,
            bnpl_term_months: self.financing.default_term_months,
        }
    }

    /// Builds the sun-hours table: built-in cities (if enabled) plus overrides.
    ///
    /// # Returns
    ///
    /// A [`SunHoursTable`] whose fallback is `locations.default_sun_hours`.
    pub fn sun_hours_table(&self) -> SunHoursTable {
        let l = &self.locations;
        let mut table = SunHoursTable::new(l.default_sun_hours);
        if l.include_builtin {
            for city in CITIES {
                table.insert(city.key, city.sun_hours);
            }
        }
        for (city, &hours) in &l.sun_hours {
            table.insert(city, hours);
        }
        table
    }

    /// Estimator carrying this configuration's constants and city table.
    pub fn estimator(&self) -> Estimator {
        Estimator::new(self.assumptions(), self.sun_hours_table())
    }
}
