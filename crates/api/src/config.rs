//! Server configuration.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present) with defaults matching the reference clients.

use std::env;

use sebo_observability::LogFormat;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listen address
    pub server: ServerConfig,
    /// Load the demo catalog at startup
    pub seed_demo_catalog: bool,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let host = lookup("SEBO_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("SEBO_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "SEBO_PORT",
                reason: format!("{raw}: {e}"),
            })?,
            None => 8000,
        };

        let seed_demo_catalog = match lookup("SEBO_SEED") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "SEBO_SEED",
                reason: format!("{raw}: expected true or false"),
            })?,
            None => true,
        };

        let log_format = match lookup("SEBO_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                key: "SEBO_LOG_FORMAT",
                reason,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            server: ServerConfig { host, port },
            seed_demo_catalog,
            log_format,
        })
    }

    /// Test configuration: seeded catalog on an OS-assigned port.
    pub fn test() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            seed_demo_catalog: true,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
