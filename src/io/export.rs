//! CSV export for location comparisons.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::estimate::compare::LocationEstimate;

/// Column header for the comparison export.
const HEADER: &str = "location,sun_hours,system_size_kw,total_cost,annual_savings,\
                       payback_years,monthly_payment,co2_reduction_tons,roi_percentage";

/// Exports comparison rows to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_csv(rows: &[LocationEstimate], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(rows, io::BufWriter::new(file))
}

/// Writes comparison rows as CSV to any writer.
///
/// One header row, then one row per location in the order given. Output is
/// deterministic for identical rows.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_csv(rows: &[LocationEstimate], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for row in rows {
        let r = &row.result;
        wtr.write_record(&[
            row.location.clone(),
            format!("{:.2}", row.sun_hours),
            r.system_size_kw.to_string(),
            format!("{:.2}", r.total_cost),
            format!("{:.2}", r.annual_savings),
            format!("{:.2}", r.payback_years),
            format!("{:.2}", r.monthly_payment),
            format!("{:.3}", r.co2_reduction_tons),
            format!("{:.2}", r.roi_percentage),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::calculator::Estimator;
    use crate::estimate::compare::compare_locations;
    use crate::estimate::location::CITIES;
    use crate::estimate::types::CalculatorInput;

    fn make_rows() -> Vec<LocationEstimate> {
        compare_locations(
            &Estimator::standard(),
            &CalculatorInput::new(500.0, 100.0, "riyadh"),
        )
        .unwrap_or_default()
    }

    #[test]
    fn header_matches_columns() {
        let mut buf = Vec::new();
        write_csv(&make_rows(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "location,sun_hours,system_size_kw,total_cost,annual_savings,\
             payback_years,monthly_payment,co2_reduction_tons,roi_percentage"
        );
    }

    #[test]
    fn row_count_matches_city_count() {
        let mut buf = Vec::new();
        write_csv(&make_rows(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.len(), CITIES.len() + 1);
    }

    #[test]
    fn riyadh_row_is_parseable() {
        let mut buf = Vec::new();
        write_csv(&make_rows(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let riyadh = rdr
            .records()
            .filter_map(|r| r.ok())
            .find(|r| r.get(0) == Some("riyadh"));
        let riyadh = riyadh.as_ref();
        assert_eq!(riyadh.and_then(|r| r.get(2)), Some("13"));
        assert_eq!(riyadh.and_then(|r| r.get(3)), Some("58500.00"));
        for i in 1..9 {
            let val: Option<f64> = riyadh.and_then(|r| r.get(i)).and_then(|v| v.parse().ok());
            assert!(val.is_some(), "column {i} should parse as f64");
        }
    }

    #[test]
    fn deterministic_output() {
        let rows = make_rows();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&rows, &mut buf1).ok();
        write_csv(&rows, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
