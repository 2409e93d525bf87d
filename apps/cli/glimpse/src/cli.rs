use crate::error::GlimpseError;

use common::ErrorLocation;

use loader_core::CLIENT_NAME;
use loader_core::config::{AppConfig, SourcesConfig};
use loader_core::report::RenderFormat;

use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Environment variable consulted when no target is given on the command line.
pub const SOURCE_URL_ENV: &str = "GLIMPSE_SOURCE_URL";

#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(about = "Fetch a remote JSON document and report it")]
pub struct Args {
    /// URL to fetch. Takes precedence over every configured target.
    pub url: Option<String>,

    /// Named source from sources.toml.
    #[arg(long)]
    pub source: Option<String>,

    /// Override the configuration directory.
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Pretty-print the document instead of canonical compact output.
    #[arg(long)]
    pub pretty: bool,

    /// Override the request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Resolve the target URL for this run.
///
/// Precedence: positional URL, `--source`, the `GLIMPSE_SOURCE_URL`
/// environment variable, `fetch.source_url` from config.json, then the
/// default source from sources.toml.
///
/// # Errors
///
/// Returns [`GlimpseError::App`] if `--source` names an unknown source or
/// nothing resolves to a target at all.
pub fn resolve_target(
    args: &Args,
    config: &AppConfig,
    sources: &SourcesConfig,
) -> Result<String, GlimpseError> {
    if let Some(url) = &args.url {
        return Ok(url.clone());
    }

    if let Some(name) = &args.source {
        return sources
            .get_source(name)
            .map(|source| source.url.clone())
            .ok_or_else(|| GlimpseError::App {
                message: format!("Unknown source '{name}'"),
                location: ErrorLocation::from(Location::caller()),
            });
    }

    if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
        if !url.is_empty() {
            return Ok(url);
        }
    }

    if let Some(url) = &config.fetch.source_url {
        return Ok(url.clone());
    }

    if let Some(source) = sources.default_source() {
        return Ok(source.url.clone());
    }

    Err(GlimpseError::App {
        message: format!(
            "No target URL: pass one as an argument, use --source, set {SOURCE_URL_ENV}, or configure fetch.source_url"
        ),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// `--pretty` wins over the configured output format.
pub fn resolve_format(args: &Args, config: &AppConfig) -> RenderFormat {
    if args.pretty {
        RenderFormat::Pretty
    } else {
        config.output.format
    }
}

/// `--timeout` wins over the configured timeout.
pub fn resolve_timeout(args: &Args, config: &AppConfig) -> Duration {
    args.timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout())
}

/// Configuration directory: `--config-dir` or the platform default.
///
/// # Errors
///
/// Returns [`GlimpseError::App`] if the platform has no config directory and
/// none was given.
pub fn resolve_config_dir(args: &Args) -> Result<PathBuf, GlimpseError> {
    if let Some(dir) = &args.config_dir {
        return Ok(dir.clone());
    }

    dirs::config_dir()
        .map(|dir| dir.join(CLIENT_NAME))
        .ok_or_else(|| GlimpseError::App {
            message: String::from("Could not determine a configuration directory"),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Log directory: platform-local app data, falling back to the temp dir.
pub fn resolve_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(CLIENT_NAME).join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join(CLIENT_NAME).join("logs"))
}
