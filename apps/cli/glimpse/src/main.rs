use glimpse::cli::{self, Args};
use glimpse::error::GlimpseError;
use glimpse::logger::initialize as LoggerInitialize;

use common::ErrorLocation;

use loader_core::config::{AppConfig, SourcesConfig};
use loader_core::lifecycle::{HostLifecycle, RunOutcome, run_on_ready};
use loader_core::loader::JsonLoader;
use loader_core::report::{ReportOutcome, Reporter, StdoutSink};

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};

fn main() -> ExitCode {
    let args = Args::parse();

    // Pick up GLIMPSE_* overrides from a local .env, if present
    dotenvy::dotenv().ok();

    match run(args) {
        Ok(RunOutcome::Completed(ReportOutcome::Document)) => ExitCode::SUCCESS,
        Ok(RunOutcome::Completed(ReportOutcome::Diagnostic)) => ExitCode::FAILURE,
        Ok(RunOutcome::TornDown) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("glimpse: {error}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn run(args: Args) -> Result<RunOutcome, GlimpseError> {
    let log_dir = cli::resolve_log_dir();
    create_dir_all(&log_dir).map_err(|e| GlimpseError::App {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    LoggerInitialize(&log_dir)?;

    info!("glimpse starting");
    info!("Log directory: {}", log_dir.display());

    let config_dir = cli::resolve_config_dir(&args)?;
    let config = AppConfig::load(&config_dir).map_err(|e| GlimpseError::Config {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let sources = SourcesConfig::load(&config_dir).map_err(|e| GlimpseError::Config {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let target = cli::resolve_target(&args, &config, &sources)?;
    let timeout = cli::resolve_timeout(&args, &config);
    let format = cli::resolve_format(&args, &config);

    info!("Target: {target} (timeout {timeout:?})");

    let loader = JsonLoader::new(timeout).map_err(|e| GlimpseError::Core {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let reporter = Reporter::new(format);
    let mut sink = StdoutSink::default();

    let (mut handle, lifecycle) = HostLifecycle::channel();

    // Process start is the readiness event
    handle.signal_ready();

    // Ctrl-C tears the run down; an aborted fetch must not write to stdout
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, tearing down");
            handle.teardown();
        }
    });

    let outcome = run_on_ready(lifecycle, &reporter, &loader, &target, &mut sink)
        .await
        .map_err(|e| GlimpseError::Core {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match outcome {
        RunOutcome::Completed(ReportOutcome::Document) => info!("Report complete"),
        RunOutcome::Completed(ReportOutcome::Diagnostic) => {
            warn!("Load failed; diagnostic reported")
        }
        RunOutcome::TornDown => warn!("Run torn down before completion"),
    }

    Ok(outcome)
}
