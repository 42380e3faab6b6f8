//! Admin API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Admin API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Prefix every route is nested under (e.g. `/api`)
    pub prefix: String,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub database_max_connections: u32,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,

    /// Enables debug-level SQL logging
    pub debug: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            prefix: "/api".to_string(),
            database_path: PathBuf::from("./emporium.db"),
            database_max_connections: 5,
            cors_origins: Vec::new(),
            debug: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the environment (and `.env`, when present).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("API_HOST").unwrap_or(defaults.host),

            port: parse_or("API_PORT", lookup("API_PORT"), defaults.port)?,

            prefix: normalize_prefix(&lookup("API_PREFIX").unwrap_or(defaults.prefix)),

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                defaults.database_max_connections,
            )?,

            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),

            debug: parse_or("DEBUG", lookup("DEBUG"), defaults.debug)?,
        };

        if config.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// `api/` and `/api/` both become `/api`; an empty prefix stays empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
