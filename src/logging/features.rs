//! Feature-specific logging targets and macros
//!
//! Each component logs under its own target so it can be filtered on its own,
//! e.g. `RUST_LOG=sp_people::mapper=debug`.

/// Feature categories for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFeature {
    Mapper,
    Client,
    Transport,
    Config,
}

impl LogFeature {
    /// Get the target string for this feature
    pub fn target(&self) -> &'static str {
        match self {
            LogFeature::Mapper => "sp_people::mapper",
            LogFeature::Client => "sp_people::client",
            LogFeature::Transport => "sp_people::transport",
            LogFeature::Config => "sp_people::config",
        }
    }

    /// Parse the short feature name used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mapper" => Some(LogFeature::Mapper),
            "client" => Some(LogFeature::Client),
            "transport" => Some(LogFeature::Transport),
            "config" => Some(LogFeature::Config),
            _ => None,
        }
    }
}

// Mapper-specific logging macros
#[macro_export]
macro_rules! log_mapper_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "sp_people::mapper", $($arg)*)
    };
}

// Client-specific logging macros
#[macro_export]
macro_rules! log_client_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "sp_people::client", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_client_info {
    ($($arg:tt)*) => {
        log::info!(target: "sp_people::client", $($arg)*)
    };
}

// Transport-specific logging macros
#[macro_export]
macro_rules! log_transport_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "sp_people::transport", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_transport_error {
    ($($arg:tt)*) => {
        log::error!(target: "sp_people::transport", $($arg)*)
    };
}

// Config-specific logging macros
#[macro_export]
macro_rules! log_config_info {
    ($($arg:tt)*) => {
        log::info!(target: "sp_people::config", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_config_error {
    ($($arg:tt)*) => {
        log::error!(target: "sp_people::config", $($arg)*)
    };
}
