//! Process configuration.
//!
//! Configuration is read from environment variables:
//!
//! - `TASKTRACK_DATABASE_URL` - Required (falls back to `DATABASE_URL`).
//!   `PostgreSQL` connection URL.
//! - `TASKTRACK_HOST` - Optional. Bind host. Defaults to `127.0.0.1`.
//! - `TASKTRACK_PORT` - Optional. Bind port. Defaults to `8000`.
//! - `TASKTRACK_POOL_SIZE` - Optional. Connection pool size. Defaults to `8`.

use std::str::FromStr;
use thiserror::Error;

const DATABASE_URL_VAR: &str = "TASKTRACK_DATABASE_URL";
const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";
const HOST_VAR: &str = "TASKTRACK_HOST";
const PORT_VAR: &str = "TASKTRACK_PORT";
const POOL_SIZE_VAR: &str = "TASKTRACK_POOL_SIZE";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum pooled database connections.
    pub pool_size: u32,
}

impl Config {
    /// Default bind host.
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    /// Default bind port.
    pub const DEFAULT_PORT: u16 = 8000;
    /// Default connection pool size.
    pub const DEFAULT_POOL_SIZE: u32 = 8;

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a numeric
    /// variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_VAR)
            .or_else(|| read(FALLBACK_DATABASE_URL_VAR))
            .ok_or(ConfigError::MissingEnvVar(DATABASE_URL_VAR))?;
        let host = read(HOST_VAR).unwrap_or_else(|| Self::DEFAULT_HOST.to_owned());
        let port = parse_or(PORT_VAR, read(PORT_VAR), Self::DEFAULT_PORT)?;
        let pool_size = parse_or(POOL_SIZE_VAR, read(POOL_SIZE_VAR), Self::DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: POOL_SIZE_VAR,
                value: pool_size.to_string(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            pool_size,
        })
    }

    /// Returns the `host:port` socket address string.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw })
    })
}
