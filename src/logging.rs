//! Tracing subscriber setup for the CLI and the HTTP server

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Filter directive used when `RUST_LOG` is not set
#[must_use]
pub fn default_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        format!("stayscope=debug,{}", config.level)
    } else {
        format!("stayscope={},warn", config.level)
    }
}

/// Install the global subscriber; `logging.format = "json"` switches to JSON lines
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, verbose)));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };

    installed.context("Failed to install tracing subscriber")
}
