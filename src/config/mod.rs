//! Client configuration
//!
//! Where to reach the directory, how to authenticate, and the default row
//! limit for searches. Loaded from TOML or JSON files, or from environment
//! variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PeopleError, PeopleResult};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "SP_PEOPLE_CONFIG";
pub const SITE_URL_ENV: &str = "SP_PEOPLE_SITE_URL";
pub const TOKEN_ENV: &str = "SP_PEOPLE_TOKEN";
pub const USERNAME_ENV: &str = "SP_PEOPLE_USERNAME";
pub const PASSWORD_ENV: &str = "SP_PEOPLE_PASSWORD";
pub const ROW_LIMIT_ENV: &str = "SP_PEOPLE_ROW_LIMIT";
pub const KEYWORDS_TERM_SET_ENV: &str = "SP_PEOPLE_KEYWORDS_TERM_SET";

/// Maximum number of search rows returned when the caller does not say
pub const DEFAULT_ROW_LIMIT: u32 = 250;

/// How requests authenticate against the directory
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Credentials {
    #[default]
    Anonymous,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => write!(f, "Anonymous"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Configuration for a PeopleClient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Site to query. Profile lookups need the my-site host.
    pub site_url: String,
    #[serde(default)]
    pub credentials: Credentials,
    /// Default maximum number of search rows
    #[serde(default = "default_row_limit")]
    pub row_limit: u32,
    /// Id of the enterprise keywords term set, needed to list keyword terms
    #[serde(default)]
    pub keywords_term_set: Option<String>,
}

fn default_row_limit() -> u32 {
    DEFAULT_ROW_LIMIT
}

impl ClientConfig {
    /// Create a configuration for the given site with anonymous access
    pub fn new(site_url: &str) -> Self {
        Self {
            site_url: site_url.to_string(),
            credentials: Credentials::default(),
            row_limit: default_row_limit(),
            keywords_term_set: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_row_limit(mut self, row_limit: u32) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_keywords_term_set(mut self, term_set_id: &str) -> Self {
        self.keywords_term_set = Some(term_set_id.to_string());
        self
    }

    /// Site URL without a trailing slash, ready for appending `/_api/...`
    pub fn site_root(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// Reject configurations that can never produce a working client
    pub fn validate(&self) -> PeopleResult<()> {
        let url = self.site_url.trim();
        if url.is_empty() {
            return Err(PeopleError::Configuration("site_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PeopleError::Configuration(format!(
                "site_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.row_limit == 0 {
            return Err(PeopleError::Configuration("row_limit must be greater than 0".to_string()));
        }
        if let Some(set) = &self.keywords_term_set {
            if set.trim().is_empty() || set.contains('/') {
                return Err(PeopleError::Configuration(format!(
                    "keywords_term_set must be a term set id, got '{}'",
                    set
                )));
            }
        }
        Ok(())
    }

    /// Load a configuration file; `.json` files are parsed as JSON, anything else as TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> PeopleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from `SP_PEOPLE_*` environment variables
    pub fn from_env() -> PeopleResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup using the environment variable names
    pub fn from_lookup<F>(lookup: F) -> PeopleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_url = lookup(SITE_URL_ENV).ok_or_else(|| {
            PeopleError::Configuration(format!("{} environment variable not set", SITE_URL_ENV))
        })?;

        let credentials = if let Some(token) = lookup(TOKEN_ENV) {
            Credentials::Bearer { token }
        } else if let Some(username) = lookup(USERNAME_ENV) {
            let password = lookup(PASSWORD_ENV).ok_or_else(|| {
                PeopleError::Configuration(format!(
                    "{} is set but {} is not",
                    USERNAME_ENV, PASSWORD_ENV
                ))
            })?;
            Credentials::Basic { username, password }
        } else {
            Credentials::Anonymous
        };

        let row_limit = match lookup(ROW_LIMIT_ENV) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                PeopleError::Configuration(format!("Invalid {} '{}': {}", ROW_LIMIT_ENV, raw, e))
            })?,
            None => default_row_limit(),
        };

        let config = Self {
            site_url,
            credentials,
            row_limit,
            keywords_term_set: lookup(KEYWORDS_TERM_SET_ENV),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Default location of the configuration file in the per-user config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sp_people").join("config.toml"))
}

/// Load the client configuration.
///
/// Uses `path` if given, then `SP_PEOPLE_CONFIG`, then the per-user default
/// file. A file named by either of the first two must exist; when the default
/// file is absent the configuration comes from the environment.
pub fn load_client_config(path: Option<&Path>) -> PeopleResult<ClientConfig> {
    let named = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));
    load_from(named, default_config_path())
}

fn load_from(named: Option<PathBuf>, default_path: Option<PathBuf>) -> PeopleResult<ClientConfig> {
    match (named, default_path) {
        (Some(p), _) if !p.exists() => Err(PeopleError::Configuration(format!(
            "Configuration file not found: {}",
            p.display()
        ))),
        (Some(p), _) => load_file(&p),
        (None, Some(p)) if p.exists() => load_file(&p),
        _ => ClientConfig::from_env(),
    }
}

fn load_file(path: &Path) -> PeopleResult<ClientConfig> {
    crate::log_config_info!("Loading config from: {}", path.display());
    ClientConfig::from_file(path).map_err(|e| {
        crate::log_config_error!("Failed to load client configuration: {}", e);
        e
    })
}
