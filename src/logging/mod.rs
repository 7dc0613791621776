//! # Logging
//!
//! Thin setup layer over `log` + `env_logger` with per-feature levels.

pub mod config;
pub mod features;

use config::{parse_level, LogConfig};

pub use features::LogFeature;

/// Logging system entry points
pub struct LoggingSystem;

impl LoggingSystem {
    /// Initialize the logging system with a custom configuration.
    ///
    /// Only one logger can be installed per process; any later call returns
    /// `AlreadyInitialized` and leaves the installed logger untouched.
    pub fn init_with_config(config: LogConfig) -> Result<(), LoggingError> {
        config.validate()?;

        let mut builder = env_logger::Builder::new();
        builder.filter_level(parse_level(&config.default_level)?);
        for (target, level) in config.feature_filters()? {
            builder.filter_module(target, level);
        }
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        builder
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)
    }
}

/// Errors that can occur in the logging system
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logging system already initialized")]
    AlreadyInitialized,
    #[error("Configuration error: {0}")]
    Config(String),
}
