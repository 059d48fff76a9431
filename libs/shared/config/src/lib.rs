use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SUGGESTION_DISMISS_DELAY_MS: u64 = 200;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctor_directory_url: String,
    pub bind_addr: SocketAddr,
    pub suggestion_dismiss_delay: Duration,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// `DOCTOR_DIRECTORY_URL` is required; the server refuses to start
    /// without a request target.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let doctor_directory_url = lookup("DOCTOR_DIRECTORY_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DOCTOR_DIRECTORY_URL"))?;
        let doctor_directory_url = validate_directory_url(doctor_directory_url.trim())?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| {
                warn!("BIND_ADDR not set, using default {}", DEFAULT_BIND_ADDR);
                DEFAULT_BIND_ADDR.to_string()
            })
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let dismiss_ms = match lookup("SUGGESTION_DISMISS_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "SUGGESTION_DISMISS_DELAY_MS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_SUGGESTION_DISMISS_DELAY_MS,
        };

        Ok(Self {
            doctor_directory_url,
            bind_addr,
            suggestion_dismiss_delay: Duration::from_millis(dismiss_ms),
        })
    }

    /// Builds a config pointing at `doctor_directory_url` with every other
    /// value defaulted.
    pub fn with_directory_url(doctor_directory_url: impl Into<String>) -> Self {
        Self {
            doctor_directory_url: doctor_directory_url.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            suggestion_dismiss_delay: Duration::from_millis(DEFAULT_SUGGESTION_DISMISS_DELAY_MS),
        }
    }
}

fn validate_directory_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name: "DOCTOR_DIRECTORY_URL",
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(ConfigError::Invalid {
            name: "DOCTOR_DIRECTORY_URL",
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
