//! `tracing-subscriber` setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;
use crate::errors::ResultflowError;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the filter from `directives`, or `RUST_LOG`, or [`DEFAULT_FILTER`].
pub fn build_filter(directives: Option<&str>) -> Result<EnvFilter, ResultflowError> {
    match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| ResultflowError::config("RUST_LOG", e.to_string())),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), ResultflowError> {
    let filter = build_filter(None)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| ResultflowError::Tracing(e.to_string()))
}
