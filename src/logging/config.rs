//! Configuration for the logging system
//!
//! Loaded from TOML files or built in code; `RUST_LOG` still wins when set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::features::LogFeature;
use super::LoggingError;

/// Main logging configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level for all modules
    #[serde(default = "default_level")]
    pub default_level: String,
    /// Feature-specific log levels, keyed by short feature name
    #[serde(default)]
    pub features: HashMap<String, String>,
}

fn default_level() -> String {
    "INFO".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            features: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// Load a logging configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoggingError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LoggingError::Config(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| LoggingError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Set the level for a single feature
    pub fn with_feature_level(mut self, feature: &str, level: &str) -> Self {
        self.features.insert(feature.to_string(), level.to_string());
        self
    }

    /// Check that every level parses and every feature is known
    pub fn validate(&self) -> Result<(), LoggingError> {
        parse_level(&self.default_level)?;
        for (feature, level) in &self.features {
            if LogFeature::from_name(feature).is_none() {
                return Err(LoggingError::Config(format!("Unknown log feature: {}", feature)));
            }
            parse_level(level)?;
        }
        Ok(())
    }

    /// Per-target filters derived from the feature table
    pub fn feature_filters(&self) -> Result<Vec<(&'static str, log::LevelFilter)>, LoggingError> {
        let mut filters = Vec::new();
        for (feature, level) in &self.features {
            let feature = LogFeature::from_name(feature)
                .ok_or_else(|| LoggingError::Config(format!("Unknown log feature: {}", feature)))?;
            filters.push((feature.target(), parse_level(level)?));
        }
        filters.sort_by_key(|(target, _)| *target);
        Ok(filters)
    }
}

/// Parse an upper- or lower-case level name
pub fn parse_level(level: &str) -> Result<log::LevelFilter, LoggingError> {
    match level.to_ascii_uppercase().as_str() {
        "TRACE" => Ok(log::LevelFilter::Trace),
        "DEBUG" => Ok(log::LevelFilter::Debug),
        "INFO" => Ok(log::LevelFilter::Info),
        "WARN" => Ok(log::LevelFilter::Warn),
        "ERROR" => Ok(log::LevelFilter::Error),
        "OFF" => Ok(log::LevelFilter::Off),
        _ => Err(LoggingError::Config(format!("Invalid log level: {}", level))),
    }
}
