//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::estimate::types::SystemType;
use crate::wizard::InputDraft;

/// Default port for `--serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    /// Form fields given on the command line.
    pub draft: InputDraft,
    pub config: Option<PathBuf>,
    pub report_out: Option<PathBuf>,
    pub compare_out: Option<PathBuf>,
    pub serve: bool,
    pub port: Option<u16>,
    pub help: bool,
}

impl CliOptions {
    /// True when any form field was supplied.
    pub fn has_input(&self) -> bool {
        self.draft != InputDraft::default()
    }
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid or repeated argument.
pub fn parse_args() -> Result<CliOptions, String> {
    parse_args_from(env::args().skip(1))
}

/// Parses an argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first invalid or repeated argument.
pub fn parse_args_from<I, S>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--bill" => {
                i += 1;
                let v = parse_number(args.next_or_err(i, flag)?, flag)?;
                set_once(&mut opts.draft.monthly_bill, v, flag)?;
            }
            "--rate" => {
                i += 1;
                let v = parse_number(args.next_or_err(i, flag)?, flag)?;
                set_once(&mut opts.draft.electricity_rate, v, flag)?;
            }
            "--roof-area" => {
                i += 1;
                let v = parse_number(args.next_or_err(i, flag)?, flag)?;
                set_once(&mut opts.draft.roof_area, v, flag)?;
            }
            "--location" => {
                i += 1;
                let v = args.next_or_err(i, flag)?.to_string();
                set_once(&mut opts.draft.location, v, flag)?;
            }
            "--system-type" => {
                i += 1;
                let v: SystemType = args.next_or_err(i, flag)?.parse()?;
                set_once(&mut opts.draft.system_type, v, flag)?;
            }
            "--config" => {
                i += 1;
                let v = PathBuf::from(args.next_or_err(i, flag)?);
                set_once(&mut opts.config, v, flag)?;
            }
            "--report-out" => {
                i += 1;
                let v = PathBuf::from(args.next_or_err(i, flag)?);
                set_once(&mut opts.report_out, v, flag)?;
            }
            "--compare-out" => {
                i += 1;
                let v = PathBuf::from(args.next_or_err(i, flag)?);
                set_once(&mut opts.compare_out, v, flag)?;
            }
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, flag)?;
                let v = raw
                    .parse::<u16>()
                    .map_err(|_| format!("{flag} value \"{raw}\" is not a valid u16"))?;
                set_once(&mut opts.port, v, flag)?;
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if !opts.help && !opts.serve && !opts.has_input() {
        return Err(
            "nothing to do: pass form fields (--bill, --roof-area, --location) or --serve"
                .to_string(),
        );
    }

    Ok(opts)
}

fn parse_number(raw: &str, flag: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("{flag} value \"{raw}\" is not a number"))
}

fn set_once<T>(slot: &mut Option<T>, value: T, flag: &str) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    Ok(())
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, flag: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, flag: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| format!("missing value for {flag}"))
    }
}

pub fn print_usage() {
    eprintln!("solar-quote: residential solar sizing and savings estimate");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  solar-quote --bill <n> --roof-area <m2> --location <city> [OPTIONS]");
    eprintln!("  solar-quote --serve [--port <u16>] [--config <path>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bill <n>            Average monthly electricity bill");
    eprintln!("  --rate <n>            Tariff per kWh (default: 0.18)");
    eprintln!("  --roof-area <m2>      Usable roof area");
    eprintln!("  --location <city>     City key, e.g. riyadh");
    eprintln!("  --system-type <t>     grid-tied | off-grid | hybrid");
    eprintln!("  --config <path>       Load constants from a TOML file");
    eprintln!("  --report-out <path>   Write a JSON report snapshot");
    eprintln!("  --compare-out <path>  Write a per-city comparison CSV");
    eprintln!("  --serve               Start the REST API (requires the `api` feature)");
    eprintln!("  --port <u16>          API port (default: {DEFAULT_PORT})");
    eprintln!("  --help                Show this help message");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;
    use crate::estimate::types::SystemType;

    #[test]
    fn parses_form_fields() {
        let opts = parse_args_from([
            "--bill",
            "500",
            "--roof-area",
            "80",
            "--location",
            "riyadh",
            "--system-type",
            "hybrid",
        ])
        .expect("parse should succeed");
        assert_eq!(opts.draft.monthly_bill, Some(500.0));
        assert_eq!(opts.draft.roof_area, Some(80.0));
        assert_eq!(opts.draft.location.as_deref(), Some("riyadh"));
        assert_eq!(opts.draft.system_type, Some(SystemType::Hybrid));
        assert!(opts.draft.electricity_rate.is_none());
        assert!(!opts.serve);
    }

    #[test]
    fn supports_serve_without_input() {
        let opts = parse_args_from(["--serve", "--port", "8080"]).expect("parse should succeed");
        assert!(opts.serve);
        assert_eq!(opts.port, Some(8080));
        assert!(!opts.has_input());
    }

    #[test]
    fn rejects_repeated_flag() {
        let err = parse_args_from(["--bill", "1", "--bill", "2"]).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn rejects_non_numeric_bill() {
        let err = parse_args_from(["--bill", "lots"]).unwrap_err();
        assert!(err.contains("not a number"));
    }

    #[test]
    fn rejects_missing_value() {
        let err = parse_args_from(["--location"]).unwrap_err();
        assert!(err.contains("missing value for --location"));
    }

    #[test]
    fn rejects_unknown_system_type() {
        assert!(parse_args_from(["--system-type", "nuclear"]).is_err());
    }

    #[test]
    fn requires_something_to_do() {
        assert!(parse_args_from(Vec::<String>::new()).is_err());
        assert!(parse_args_from(["--help"]).is_ok());
    }
}
