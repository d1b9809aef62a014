// Runtime configuration, read once from the environment at startup.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the remote endpoint URL.
pub const ENDPOINT_VAR: &str = "MONKEY_MCP_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "MONKEY_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MONKEY_HTTP_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Settings for the data provider. `endpoint` is `None` when remote
/// fetching is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read `MONKEY_MCP_URL` and `MONKEY_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(ENDPOINT_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    /// Build a config from raw values. Blank endpoints disable the remote
    /// source; a missing timeout uses the default.
    pub fn from_values(
        endpoint: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let timeout = match timeout_secs.as_deref().map(str::trim) {
            None | Some("") => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw.to_string())),
            },
        };

        Ok(Config { endpoint, timeout })
    }

    /// Config pointing at `endpoint` with the default timeout.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Config {
            endpoint: Some(endpoint.into()),
            ..Config::default()
        }
    }
}
