//! Tracker configuration.
//!
//! The core reads no environment variables or files; the binary builds a
//! [`TrackerConfig`] from its config file and flags and hands it over.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::tracking::DEFAULT_BASE_URL;
use crate::user_agent;

/// Default total request timeout per candidate URL.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Largest accepted timeout value, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 120;

/// Invalid configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A timeout is outside `1..=MAX_TIMEOUT_SECS`
    #[error("invalid `{field}` value {value}: expected range 1..={max}", max = MAX_TIMEOUT_SECS)]
    TimeoutOutOfRange {
        /// The offending field name
        field: &'static str,
        /// The rejected value
        value: u64,
    },

    /// The base URL is not an absolute http(s) URL
    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The User-Agent is empty
    #[error("user agent must not be empty")]
    EmptyUserAgent,
}

/// Settings for [`crate::tracking::Tracker`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Host serving the tracking pages.
    pub base_url: String,
    /// Total timeout for one candidate fetch, in seconds.
    pub timeout_secs: u64,
    /// Connect timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: user_agent::default_tracking_user_agent(),
        }
    }
}

impl TrackerConfig {
    /// Checks ranges and the base URL.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_timeout("timeout_secs", self.timeout_secs)?;
        validate_timeout("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_base_url(&self.base_url)?;
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        Ok(())
    }

    /// Total request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn validate_timeout(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if (1..=MAX_TIMEOUT_SECS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::TimeoutOutOfRange { field, value })
    }
}

fn validate_base_url(value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() {
        return Err(invalid("must not contain a query string"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.base_url, "https://www.bluedart.com");
    }

    #[test]
    fn test_timeout_range() {
        let mut config = TrackerConfig {
            timeout_secs: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::TimeoutOutOfRange {
                field: "timeout_secs",
                value: 0
            }
        );
        config.timeout_secs = MAX_TIMEOUT_SECS;
        assert!(config.validate().is_ok());
        config.connect_timeout_secs = MAX_TIMEOUT_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_validation() {
        let mut config = TrackerConfig {
            base_url: "ftp://example.com".to_string(),
            ..TrackerConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("scheme"));
        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.base_url = "http://127.0.0.1:9000".to_string();
        assert!(config.validate().is_ok());
        config.base_url = "http://127.0.0.1:9000/?x=1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let config = TrackerConfig {
            user_agent: "  ".to_string(),
            ..TrackerConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::EmptyUserAgent);
    }
}
