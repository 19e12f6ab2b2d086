//! Downloadable JSON report snapshot.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::estimate::types::{CalculatorInput, CalculatorResult};

/// `{formData, results, generatedAt}` blob offered by "download report".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub form_data: CalculatorInput,
    pub results: CalculatorResult,
    /// RFC 3339 UTC timestamp.
    pub generated_at: DateTime<Utc>,
}

impl ReportSnapshot {
    pub fn new(
        form_data: CalculatorInput,
        results: CalculatorResult,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            form_data,
            results,
            generated_at,
        }
    }

    /// Snapshot stamped with the current time.
    pub fn now(form_data: CalculatorInput, results: CalculatorResult) -> Self {
        Self::new(form_data, results, Utc::now())
    }
}

/// Writes the snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns an `ExportError` if serialization or writing fails.
pub fn write_report(report: &ReportSnapshot, mut writer: impl Write) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the snapshot to a file at `path`.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_report(report: &ReportSnapshot, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_report(report, BufWriter::new(file))
}
