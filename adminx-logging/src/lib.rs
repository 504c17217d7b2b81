//! Tracing initialization for adminx front ends.
//!
//! Libraries only emit events; binaries call [`init_with_defaults`] once at
//! startup. Log lines go to stderr so that command output on stdout stays
//! machine-readable.
//!
//! Filtering uses the standard `RUST_LOG` variable:
//! - `RUST_LOG=debug` - Set global level
//! - `RUST_LOG=adminx_core=debug` - Trace cache hits and refreshes
//!
//! `RUST_LOG_FORMAT` selects the output format: `pretty` (default),
//! `compact` or `json`.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const FORMAT_ENV: &str = "RUST_LOG_FORMAT";

#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Failed to initialize tracing: {0}")]
    AlreadyInitialized(String),
    #[error("Unknown log format '{0}' (expected pretty, compact or json)")]
    UnknownFormat(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LogInitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(LogInitError::UnknownFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// Read the format from `RUST_LOG_FORMAT`, falling back to pretty on
    /// unset or unrecognised values.
    pub fn from_env() -> Self {
        std::env::var(FORMAT_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Initialize with a default filter if `RUST_LOG` is not set.
///
/// # Arguments
/// * `default_filter` - The filter string to use if RUST_LOG is not set (e.g., "warn", "debug")
///
/// # Returns
/// Ok(()) on success, or an error if a global subscriber is already installed
pub fn init_with_defaults(default_filter: &str) -> Result<(), LogInitError> {
    init_with_format(default_filter, LogFormat::from_env())
}

pub fn init_with_format(default_filter: &str, format: LogFormat) -> Result<(), LogInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false).json())
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).pretty())
            .try_init(),
    };

    result.map_err(|e| LogInitError::AlreadyInitialized(e.to_string()))
}

/// Initialize for testing: debug level, captured by the test harness.
pub fn init_for_testing() -> Result<(), LogInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .map_err(|e| LogInitError::AlreadyInitialized(e.to_string()))
}
