use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::logging::DEFAULT_MUTED_SUBSTRING;
use crate::services::notify::DEFAULT_API_URL;
use crate::services::poller::{CursorPolicy, DEFAULT_RETRY_PERIOD};
use crate::services::practicum::DEFAULT_ENDPOINT;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub ops_chat_id: String,
    pub practicum_endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
    pub cursor_policy: CursorPolicy,
    pub log_mute_substring: Option<String>,
    pub metrics_addr: Option<SocketAddr>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let ops_chat_id = lookup("OPS_CHAT_ID")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| telegram_chat_id.clone());

        let practicum_endpoint = lookup("PRACTICUM_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let telegram_api_url = lookup("TELEGRAM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let retry_period = parse_optional::<u64>(&lookup, "RETRY_PERIOD")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_PERIOD);

        let request_timeout = Duration::from_secs(
            parse_optional::<u64>(&lookup, "REQUEST_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        let cursor_policy = parse_optional::<CursorPolicy>(&lookup, "CURSOR_POLICY")?
            .unwrap_or_default();

        // An explicitly empty value turns the filter off
        let log_mute_substring = match lookup("LOG_MUTE_SUBSTRING") {
            Some(value) if value.is_empty() => None,
            Some(value) => Some(value),
            None => Some(DEFAULT_MUTED_SUBSTRING.to_string()),
        };

        let metrics_addr = parse_optional::<SocketAddr>(&lookup, "METRICS_ADDR")?;

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            ops_chat_id,
            practicum_endpoint,
            telegram_api_url,
            retry_period,
            request_timeout,
            cursor_policy,
            log_mute_substring,
            metrics_addr,
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
    }
}
