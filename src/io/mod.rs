//! Report and comparison exports.

pub mod export;
pub mod report;
