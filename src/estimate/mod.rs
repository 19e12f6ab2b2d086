//! Solar sizing, cost and savings estimation.

pub mod calculator;
/// Location comparison runs.
pub mod compare;
/// BNPL installment plans.
pub mod financing;
/// City sun-hours table.
pub mod location;
pub mod roof;
pub mod types;

pub use calculator::{Assumptions, Estimate, Estimator, compute};
pub use compare::{LocationEstimate, compare_locations};
pub use financing::{InstallmentPlan, installment_plans};
pub use location::{SunHours, SunHoursTable};
pub use roof::{RoofAssessment, assess_roof};
pub use types::{CalculatorInput, CalculatorResult, SystemType};
