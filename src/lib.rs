//! Residential solar quoting: system sizing, cost, savings and financing.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
/// TOML configuration of pricing, financing and sun-hours.
pub mod config;
pub mod error;
pub mod estimate;
/// Report snapshot and CSV exports.
pub mod io;
/// Step-by-step quote form validation.
pub mod wizard;
