//! solar-quote entry point: CLI wiring, config loading and output.

use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_quote::cli::{self, CliOptions};
use solar_quote::config::CalculatorConfig;
use solar_quote::estimate::{assess_roof, compare_locations, installment_plans};
use solar_quote::io::export::export_csv;
use solar_quote::io::report::{ReportSnapshot, export_report};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

/// Loads `--config` if given, otherwise the standard constants, and validates.
fn load_config(opts: &CliOptions) -> CalculatorConfig {
    let config = match opts.config {
        Some(ref path) => {
            CalculatorConfig::from_toml_file(path).unwrap_or_else(|e| fail(e))
        }
        None => CalculatorConfig::standard(),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

/// Computes and prints the quote, then writes any requested exports.
fn run_quote(opts: &CliOptions, config: &CalculatorConfig) {
    let input = opts.draft.finish().unwrap_or_else(|e| fail(e));
    let estimator = config.estimator();
    let estimate = estimator
        .compute_detailed(&input)
        .unwrap_or_else(|e| fail(e));
    let result = estimate.result;

    println!("{result}");
    if estimate.sun_hours.matched {
        println!("Sun hours:         {:.1} h/day", estimate.sun_hours.hours);
    } else {
        println!(
            "Sun hours:         {:.1} h/day (default, \"{}\" is not a listed city)",
            estimate.sun_hours.hours, input.location
        );
    }

    let roof = assess_roof(&input, &result, config.roof.area_per_kw_m2);
    println!(
        "\nRoof: {:.1} m² needed of {:.1} m² available ({}, up to {} kW)",
        roof.required_area_m2,
        roof.available_area_m2,
        if roof.fits { "fits" } else { "does not fit" },
        roof.max_system_kw
    );

    println!("\nInstallment plans:");
    for plan in installment_plans(result.total_cost, &config.financing.terms_months) {
        println!("  {:>2} months: {:.2}/month", plan.months, plan.monthly_payment);
    }

    if let Some(ref path) = opts.compare_out {
        let rows = compare_locations(&estimator, &input).unwrap_or_else(|e| fail(e));
        if let Err(e) = export_csv(&rows, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        info!("comparison written to {}", path.display());
    }

    if let Some(ref path) = opts.report_out {
        let report = ReportSnapshot::now(input, result);
        if let Err(e) = export_report(&report, path) {
            fail(format!("failed to write report: {e}"));
        }
        info!("report written to {}", path.display());
    }
}

#[cfg(feature = "api")]
fn serve(opts: &CliOptions, config: &CalculatorConfig) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use solar_quote::api::{self, AppState};

    let state = Arc::new(AppState::from_config(config));
    let port = opts.port.unwrap_or(cli::DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new()
        .unwrap_or_else(|e| fail(format!("failed to create tokio runtime: {e}")));
    if let Err(e) = rt.block_on(api::serve(state, addr)) {
        fail(format!("server error on {addr}: {e}"));
    }
}

#[cfg(not(feature = "api"))]
fn serve(_opts: &CliOptions, _config: &CalculatorConfig) {
    fail("--serve requires building with `--features api`");
}

fn main() {
    init_logging();

    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if opts.help {
        cli::print_usage();
        return;
    }

    let config = load_config(&opts);

    if opts.has_input() {
        run_quote(&opts, &config);
    }

    if opts.serve {
        serve(&opts, &config);
    }
}
