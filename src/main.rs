//! CLI entry point for the bikeshare statistics explorer.
//!
//! Runs the interactive prompt loop by default, or a single report with the
//! `report` subcommand.

use anyhow::Result;
use bikeshare_stats::{
    config::CityConfig,
    error::BikeshareError,
    interactive::{Prompter, run_session},
    output::{log_json, render_banner, render_empty, render_report},
    pipeline::{resolve_selection, run_report},
    selection::{DayFilter, FilterSelection, MonthFilter},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// JSON file mapping city names to trip files (defaults to BIKESHARE_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the city CSV files (defaults to BIKESHARE_DATA_DIR)
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for filters and print reports until you decline to restart
    Explore,
    /// Print one report without prompting
    Report {
        /// City to analyze (e.g., "chicago", "new york city", "washington")
        #[arg(short, long)]
        city: String,

        /// January through June, or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// 1-7 (1 = Sunday), a weekday name, or "all"
        #[arg(short = 'w', long, default_value = "all")]
        day: DayFilter,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so it does not interleave with the prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config, cli.data_dir)?;
    debug!(?config, "City config resolved");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            run_session(&config, &mut prompter)?;
        }
        Commands::Report { city, month, day } => {
            let selection = resolve_selection(&config, &city, month, day)?;
            report_once(&config, &selection)?;
        }
    }

    Ok(())
}

/// Builds the city config from flags, then environment, then built-in defaults.
fn load_config(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<CityConfig> {
    let config_path = config_path.or_else(|| std::env::var_os("BIKESHARE_CONFIG").map(PathBuf::from));
    let data_dir = data_dir.or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from));

    let mut config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "Loading city config");
            CityConfig::load(&path)?
        }
        None => CityConfig::default(),
    };

    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }

    Ok(config)
}

/// Prints the banner and report for one selection.
///
/// An empty result is reported on stdout and is not an error.
fn report_once(config: &CityConfig, selection: &FilterSelection) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", render_banner(selection))?;

    match run_report(config, selection) {
        Ok(report) => {
            log_json(&report)?;
            write!(out, "{}", render_report(&report))?;
        }
        Err(BikeshareError::EmptyResultSet) => {
            writeln!(out, "{}", render_empty(selection))?;
        }
        Err(e) => return Err(e.into()),
    }

    out.flush()?;
    Ok(())
}
