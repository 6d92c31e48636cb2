//! Gateway configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_STORAGE_PATH: &str = ".insight-sphere/storage.json";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    pub storage_path: PathBuf,
    /// TCP connect timeout. Requests themselves are never timed out.
    pub connect_timeout_secs: u64,
    /// `limit` sent by `recent_activities` when the caller passes none.
    pub activity_limit: u32,
}

impl GatewayConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the URL is `http(s)://`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `INSIGHT_API_BASE_URL`: default `http://localhost:5000`
    /// - `INSIGHT_STORAGE_PATH`: default `.insight-sphere/storage.json`
    /// - `INSIGHT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `INSIGHT_ACTIVITY_LIMIT`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for an empty or non-http URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("INSIGHT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let storage_path = std::env::var("INSIGHT_STORAGE_PATH").unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_owned());

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            storage_path: PathBuf::from(storage_path),
            connect_timeout_secs: env_parse("INSIGHT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            activity_limit: env_parse("INSIGHT_ACTIVITY_LIMIT", DEFAULT_ACTIVITY_LIMIT).max(1),
        })
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
