//! Installs the global `tracing` subscriber.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("invalid log filter {0:?}: {1}")]
    Filter(String, String),
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Logs to stderr with the given filter directive (see [`EnvFilter`]).
///
/// Returns an error instead of panicking when called a second time.
pub fn init(filter: &str) -> Result<(), LoggerError> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| LoggerError::Filter(filter.to_string(), e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInstalled)
}
