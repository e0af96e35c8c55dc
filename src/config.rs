//! Runtime configuration.
//!
//! Values come from explicit construction or from the environment. The
//! server port has no default: it must be configured.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_DIR_ENV: &str = "CAMPUS_BOOKS_DATA_DIR";
pub const PORT_ENV: &str = "CAMPUS_BOOKS_PORT";
/// Fallback port variable used by most hosting platforms.
pub const FALLBACK_PORT_ENV: &str = "PORT";
pub const LOG_ENV: &str = "RUST_LOG";

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no port configured: set CAMPUS_BOOKS_PORT or PORT")]
    MissingPort,
    #[error("invalid port {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory for `FileStorage`.
    pub data_dir: PathBuf,
    /// Port for the health-check listener.
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, port: u16) -> Self {
        Self {
            data_dir: data_dir.into(),
            port,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_port = lookup(PORT_ENV)
            .or_else(|| lookup(FALLBACK_PORT_ENV))
            .ok_or(ConfigError::MissingPort)?;
        let port = parse_port(&raw_port)?;

        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let log_filter = lookup(LOG_ENV)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            port,
            log_filter,
        })
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidPort {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
