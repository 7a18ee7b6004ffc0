//! Structured logging to stderr.
//!
//! stdout carries command output only, so logs never mix with it.

use anyhow::anyhow;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogFormat;

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

fn init_json_logging(filter: EnvFilter) -> anyhow::Result<()> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

fn init_pretty_logging(filter: EnvFilter) -> anyhow::Result<()> {
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

/// Standard log event names.
pub mod events {
    /// A command started.
    pub const COMMAND_STARTED: &str = "command_started";

    /// A config file was loaded.
    pub const CONFIG_LOADED: &str = "config_loaded";

    /// A command failed.
    pub const COMMAND_FAILED: &str = "command_failed";
}
