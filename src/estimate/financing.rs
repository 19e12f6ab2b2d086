//! Zero-interest buy-now-pay-later installment plans.

use serde::Serialize;

/// Terms offered at checkout, in months.
pub const DEFAULT_TERMS_MONTHS: &[u32] = &[18, 24, 30];

/// One BNPL option for a given total cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPlan {
    pub months: u32,
    pub monthly_payment: f64,
    /// Sum of all installments; equals the cost since plans carry no interest.
    pub total: f64,
}

impl InstallmentPlan {
    /// Splits `total_cost` evenly over `months`. Returns `None` for a zero term.
    pub fn new(total_cost: f64, months: u32) -> Option<Self> {
        if months == 0 {
            return None;
        }
        Some(Self {
            months,
            monthly_payment: total_cost / f64::from(months),
            total: total_cost,
        })
    }
}

/// Builds one plan per term, in the order given. Zero-month terms are skipped.
///
/// # Arguments
///
/// * `total_cost` - Installed system cost to split
/// * `terms_months` - Offered terms, e.g. [`DEFAULT_TERMS_MONTHS`]
///
/// # Returns
///
/// One interest-free [`InstallmentPlan`] per non-zero term.
pub fn installment_plans(total_cost: f64, terms_months: &[u32]) -> Vec<InstallmentPlan> {
    terms_months
        .iter()
        .filter_map(|&m| InstallmentPlan::new(total_cost, m))
        .collect()
}
