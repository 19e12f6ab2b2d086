//! Roof-area fit check for a recommended system.

use serde::Serialize;

use super::types::{CalculatorInput, CalculatorResult};

/// Panel footprint per installed kW, including row spacing (m²/kW).
pub const DEFAULT_AREA_PER_KW_M2: f64 = 6.5;

/// Whether the recommended array fits on the stated roof.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofAssessment {
    pub required_area_m2: f64,
    pub available_area_m2: f64,
    pub fits: bool,
    /// Largest whole-kW system the roof can hold.
    pub max_system_kw: u32,
}

/// Compares the array footprint to the roof area. Never alters the estimate.
///
/// # Arguments
///
/// * `input` - The form submission; only `roof_area` is read
/// * `result` - The estimate whose `system_size_kw` is placed on the roof
/// * `area_per_kw_m2` - Panel footprint per kW, including spacing
///
/// # Returns
///
/// The required and available areas, whether the array fits, and the
/// largest system the roof could hold.
pub fn assess_roof(
    input: &CalculatorInput,
    result: &CalculatorResult,
    area_per_kw_m2: f64,
) -> RoofAssessment {
    let required_area_m2 = f64::from(result.system_size_kw) * area_per_kw_m2;
    RoofAssessment {
        required_area_m2,
        available_area_m2: input.roof_area,
        fits: required_area_m2 <= input.roof_area,
        max_system_kw: roof_capacity_kw(input.roof_area, area_per_kw_m2),
    }
}

/// Whole kW that fit in `area_m2`. Capacities past `u32::MAX` kW clamp to it.
fn roof_capacity_kw(area_m2: f64, area_per_kw_m2: f64) -> u32 {
    let kw = (area_m2 / area_per_kw_m2).floor();
    if kw.is_nan() || kw < 1.0 {
        0
    } else if kw >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        kw as u32
    }
}
