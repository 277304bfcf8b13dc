//! Global `tracing` subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::error::{LogError, LogResult};
use crate::config::{LogFormat, LoggingConfig};

/// Filter from `RUST_LOG` if set, otherwise the configured level.
#[must_use]
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
}

/// Install the global subscriber described by `config`. Logs go to stderr so
/// stdout stays free for command output.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> LogResult<()> {
    let registry = tracing_subscriber::registry().with(build_filter(config));
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => registry.with(fmt.json()).try_init(),
        LogFormat::Pretty => registry.with(fmt.pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt.compact()).try_init(),
    };

    result.map_err(|e| LogError::AlreadyInitialized(e.to_string()))
}
