//! Remote job board API: listing search with paginated results, a
//! step-by-step posting wizard, saved jobs, resumes, the companies
//! directory and the newsletter.

pub mod admin_cli;
pub mod auth;
pub mod core;
pub mod models;
pub mod posting;
pub mod repository;
pub mod search;
pub mod utils;
pub mod web;

pub use web::{build_rocket, start_web_server};

use crate::core::config_manager::LoggingSettings;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber: human-readable output on stdout plus
/// an optional JSON log file. `RUST_LOG` takes precedence over the
/// configured filter.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("Invalid log filter: {}", settings.filter))?,
    };

    let json_layer = match &settings.json_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // Clear file on startup
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
