use std::io;
use thiserror::Error;

/// Unified error type for the people client.
///
/// Mapping problems that come from the record definition itself
/// (`Configuration`) are kept apart from problems with the data that came back
/// from the directory (`TypeMismatch`) and from failures reported by the
/// remote service (`NotFound`, `Transport`).
#[derive(Debug, Error)]
pub enum PeopleError {
    /// The record type or the client is configured in a way that can never work
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A raw bag value could not be assigned to the field it is mapped to
    #[error("Type mismatch on field '{field}' (source key '{key}'): {message}")]
    TypeMismatch {
        field: String,
        key: String,
        message: String,
    },

    /// The directory does not know the requested account
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network, authentication or HTTP failures reported by the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Errors related to serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Errors related to IO operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Conversion from serde_json::Error to PeopleError
impl From<serde_json::Error> for PeopleError {
    fn from(error: serde_json::Error) -> Self {
        PeopleError::Serialization(error.to_string())
    }
}

/// Conversion from toml::de::Error to PeopleError
impl From<toml::de::Error> for PeopleError {
    fn from(error: toml::de::Error) -> Self {
        PeopleError::Configuration(format!("Invalid TOML configuration: {}", error))
    }
}

/// Conversion from reqwest::Error to PeopleError
impl From<reqwest::Error> for PeopleError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            PeopleError::Serialization(error.to_string())
        } else {
            PeopleError::Transport(error.to_string())
        }
    }
}

/// Result type alias for operations that can result in a PeopleError
pub type PeopleResult<T> = Result<T, PeopleError>;
