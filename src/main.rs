//! check_pf - Nagios plugin for pf(4)
//!
//! Checks whether pf is enabled and, if it is, compares the number of entries
//! in the state table against warning and critical thresholds.
//!
//! # Usage
//!
//! ```bash
//! check_pf                  # Thresholds at 80% / 90% of the state limit
//! check_pf -w 8000 -c 9500  # Explicit thresholds
//! check_pf -V               # Print the plugin version
//! ```
//!
//! Prints exactly one status line on stdout and exits 0 (OK), 1 (WARNING),
//! 2 (CRITICAL) or 3 (UNKNOWN). `-V`, `-h` and usage errors write to stderr
//! and exit 64. Diagnostics from `-v` also go to stderr.

use std::ffi::OsString;
use std::process::ExitCode;

use check_pf::core::thresholds::{DEFAULT_CRIT_PERCENT, DEFAULT_WARN_PERCENT};
use check_pf::validators::parse_threshold;
use check_pf::{PfctlConfig, PfctlSource, Report, ThresholdConfig, probe};
use clap::Parser;
use tracing::Level;

shadow_rs::shadow!(build);

const PROGNAME: &str = env!("CARGO_BIN_NAME");

/// Exit status for -V, -h and usage errors (`EX_USAGE`), outside the verdict codes
const EXIT_USAGE: u8 = 64;

#[derive(Parser, Debug)]
#[command(
    name = PROGNAME,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Print the plugin version
    #[arg(short = 'V')]
    print_version: bool,

    /// Print the plugin help
    #[arg(short = 'h')]
    print_help: bool,

    /// Warning when <number> states
    #[arg(
        short = 'w',
        value_name = "number",
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    warning: Option<OsString>,

    /// Critical when <number> states
    #[arg(
        short = 'c',
        value_name = "number",
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    critical: Option<OsString>,

    /// Log more to stderr (repeatable)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.render().to_string();
            if let Some(line) = rendered.lines().next() {
                eprintln!("{line}");
            }
            usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    init_logging(cli.verbose);

    if cli.print_version {
        version();
        return ExitCode::from(EXIT_USAGE);
    }
    if cli.print_help {
        help();
        usage();
        return ExitCode::from(EXIT_USAGE);
    }

    let report = match threshold_config(&cli) {
        Ok(config) => probe(|| PfctlSource::open(PfctlConfig::default()), &config),
        Err(e) => Report::unknown(e),
    };

    println!("{report}");
    ExitCode::from(report.exit_code())
}

/// Parses both threshold flags and rejects an explicitly inverted pair
/// before pf is queried.
fn threshold_config(cli: &Cli) -> check_pf::Result<ThresholdConfig> {
    let warning = cli
        .warning
        .as_deref()
        .map(|raw| parse_threshold('w', &raw.to_string_lossy()))
        .transpose()?;
    let critical = cli
        .critical
        .as_deref()
        .map(|raw| parse_threshold('c', &raw.to_string_lossy()))
        .transpose()?;

    let config = ThresholdConfig::new(warning, critical);
    config.check_overrides()?;
    Ok(config)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout belongs to the status line
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn version() {
    if build::SHORT_COMMIT.is_empty() {
        eprintln!("{PROGNAME} {}", build::PKG_VERSION);
    } else {
        eprintln!("{PROGNAME} {} ({})", build::PKG_VERSION, build::SHORT_COMMIT);
    }
}

fn usage() {
    eprintln!("Usage: {PROGNAME} [-Vhv] [-w number] [-c number]");
    eprintln!("        -V        - Print the plugin version");
    eprintln!("        -h        - Print the plugin help");
    eprintln!("        -v        - Log more detail to stderr (repeatable)");
    eprintln!(
        "        -w number - Warning when <number> states (default: {DEFAULT_WARN_PERCENT}% of state limit)"
    );
    eprintln!(
        "        -c number - Critical when <number> states (default: {DEFAULT_CRIT_PERCENT}% of state limit)"
    );
}

fn help() {
    version();
    eprintln!();
    eprintln!("This plugin checks if PF is enabled, and if it is, the number of states");
    eprintln!("currently in the state table.");
    eprintln!();
    eprintln!("The current state count is compared to the given (or default) thresholds and");
    eprintln!("the proper Nagios state value is returned.");
    eprintln!();
}
