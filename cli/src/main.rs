use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use probe_core::{bootstrap, HttpAdapter, Suite};

mod output;

/// Dependencies whose logs are noise unless explicitly asked for.
const QUIET_MODULES: &[&str] = &["ureq", "ureq_proto", "rustls"];

/// Exit status for configuration problems, distinct from probe failures.
const CONFIG_ERROR_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "api-probe")]
#[command(about = "Probe the authentication and user endpoints of an HTTP API")]
struct Cli {
    /// Base URL of the API (falls back to API_BASE_URL, then http://localhost:8080/api)
    #[arg(long)]
    base_url: Option<String>,

    /// Run only the named probe; repeat to select several
    #[arg(long = "probe", value_name = "NAME")]
    probes: Vec<String>,

    /// List the declared probes and exit
    #[arg(long)]
    list: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, env = "API_PROBE_TIMEOUT_SECS")]
    timeout: u64,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum Format {
    /// Colored PASS/FAIL summary
    Text,
    /// One JSON document with every outcome
    Json,
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    for module in QUIET_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }
    builder.init();
}

fn run(cli: Cli) -> Result<u8> {
    let suite = Suite::catalog()
        .only(&cli.probes)
        .context("invalid probe selection")?;

    if cli.list {
        output::print_probe_list(suite.probes());
        return Ok(0);
    }

    let config = match bootstrap(cli.base_url) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return Ok(CONFIG_ERROR_EXIT);
        }
    };

    let adapter = HttpAdapter::new(config, Duration::from_secs(cli.timeout));
    let report = suite.run(&adapter);

    match cli.format {
        Format::Text => output::print_test_summary(&report),
        Format::Json => output::print_json(&report)?,
    }
    Ok(report.exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(CONFIG_ERROR_EXIT)
        }
    }
}
