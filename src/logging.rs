//! Tracing setup
//!
//! The terminal belongs to the game screen, so log output only goes to a file.
//! Without a file no subscriber is installed and every event is dropped.

use anyhow::{Context, Result};
use std::{fs::File, path::Path, sync::Mutex};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
