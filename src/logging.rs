//! Log setup
//!
//! The TUI owns stdout and stderr, so logs only go to a file, and only when
//! one is configured.

use crate::config::Config;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Open(#[from] io::Error),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}

/// Install the global subscriber; returns whether logging is on
pub fn init(config: &Config) -> Result<bool, LoggingError> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    let filter =
        EnvFilter::try_new(&config.log_filter).map_err(|e| LoggingError::Filter(e.to_string()))?;
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)?;
    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_means_no_subscriber() {
        assert!(!init(&Config::default()).unwrap());
    }

    #[test]
    fn test_bad_filter_is_reported() {
        let config = Config {
            log_file: Some(std::env::temp_dir().join("varpane-filter-test.log")),
            log_filter: "varpane=notalevel".to_string(),
            ..Config::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::Filter(_))));
    }
}
