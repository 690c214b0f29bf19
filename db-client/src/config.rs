//! Startup configuration.
//!
//! A [`Config`] is read once (TOML file, then environment overrides) and is
//! read-only afterwards. The factory consumes it by reference.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, InitResult};
use crate::utils::log_sanitizer::mask_secret;

/// Default Redis port.
pub const DEFAULT_REDIS_PORT: u16 = 6379;
/// Default MySQL port.
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
/// Default Redis key namespace.
pub const DEFAULT_KEY_PREFIX: &str = "db-client";

/// Backend kind requested by the configuration.
///
/// Unknown names are kept verbatim in [`DbType::Other`] so the factory can
/// report exactly what was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DbType {
    Redis,
    MySql,
    /// Anything else; always rejected by the factory.
    Other(String),
}

impl FromStr for DbType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Self::Redis,
            "mysql" => Self::MySql,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for DbType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<DbType> for String {
    fn from(t: DbType) -> Self {
        t.to_string()
    }
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::MySql => write!(f, "mysql"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Connection settings for the selected backend.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which backend to use.
    pub db_type: DbType,
    /// Host name or IP address.
    pub db_addr: String,
    /// Port; falls back to the backend's well-known port when absent.
    pub db_port: Option<u16>,
    /// User name (MySQL).
    pub db_user: Option<String>,
    /// Password (Redis AUTH or MySQL user password).
    pub db_password: Option<String>,
    /// Database name (MySQL).
    pub db_name: Option<String>,
    /// Enable driver-level statement logging.
    pub debug: bool,
    /// Key namespace (Redis).
    pub key_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_type: DbType::Redis,
            db_addr: "127.0.0.1".to_string(),
            db_port: None,
            db_user: None,
            db_password: None,
            db_name: None,
            debug: false,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_type", &self.db_type)
            .field("db_addr", &self.db_addr)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &self.db_password.as_deref().map(mask_secret))
            .field("db_name", &self.db_name)
            .field("debug", &self.debug)
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> InitResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BackendError::InvalidConfig {
            field: "file".to_string(),
            detail: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> InitResult<Self> {
        toml::from_str(content).map_err(|e| BackendError::InvalidConfig {
            field: "file".to_string(),
            detail: format!("Failed to parse config: {e}"),
        })
    }

    /// Apply `DB_*` environment variable overrides on top of `self`.
    pub fn with_env_overrides(self) -> InitResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Defaults plus environment variables.
    pub fn from_env() -> InitResult<Self> {
        Self::default().with_env_overrides()
    }

    /// File (when given) then environment; environment wins.
    pub fn load(path: Option<impl AsRef<Path>>) -> InitResult<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> InitResult<Self> {
        if let Some(v) = lookup("DB_TYPE") {
            self.db_type = DbType::from(v);
        }
        if let Some(v) = lookup("DB_ADDR") {
            self.db_addr = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            let port = v.parse::<u16>().map_err(|e| BackendError::InvalidConfig {
                field: "db_port".to_string(),
                detail: format!("'{v}' is not a valid port: {e}"),
            })?;
            self.db_port = Some(port);
        }
        if let Some(v) = lookup("DB_USER") {
            self.db_user = Some(v);
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.db_password = Some(v);
        }
        if let Some(v) = lookup("DB_NAME") {
            self.db_name = Some(v);
        }
        if let Some(v) = lookup("DB_DEBUG") {
            self.debug = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(v) = lookup("DB_KEY_PREFIX") {
            self.key_prefix = v;
        }
        Ok(self)
    }

    /// Effective port: the configured one, or the backend's default.
    pub fn port(&self) -> u16 {
        self.db_port.unwrap_or(match self.db_type {
            DbType::Redis => DEFAULT_REDIS_PORT,
            DbType::MySql => DEFAULT_MYSQL_PORT,
            DbType::Other(_) => 0,
        })
    }

    /// Check connection parameters before any connection attempt.
    pub fn validate(&self) -> InitResult<()> {
        if self.db_addr.trim().is_empty() {
            return Err(invalid("db_addr", "must not be empty"));
        }
        if self.port() == 0 {
            return Err(invalid("db_port", "must be between 1 and 65535"));
        }
        match self.db_type {
            DbType::MySql if self.db_name.as_deref().is_none_or(str::is_empty) => {
                Err(invalid("db_name", "required for mysql"))
            }
            DbType::Redis if self.key_prefix.is_empty() => {
                Err(invalid("key_prefix", "must not be empty"))
            }
            _ => Ok(()),
        }
    }
}

fn invalid(field: &str, detail: &str) -> BackendError {
    BackendError::InvalidConfig {
        field: field.to_string(),
        detail: detail.to_string(),
    }
}
