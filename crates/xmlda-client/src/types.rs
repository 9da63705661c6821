// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client configuration types.
//!
//! [`XmlDaConfig`] carries everything fixed at client construction: the
//! server URL, the timeout pair applied to every HTTP exchange, the default
//! locale stamped onto requests that omit one, and the seed of the request
//! handle counter.
//!
//! Two timeout profiles are provided, see [`TimeoutProfile`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, XmlDaError, XmlDaResult};

// =============================================================================
// Constants
// =============================================================================

/// Locale applied when a request omits one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Standard connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Standard request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Extended connect timeout.
pub const EXTENDED_CONNECT_TIMEOUT: Duration = Duration::from_millis(11_000);

/// Extended request timeout.
pub const EXTENDED_REQUEST_TIMEOUT: Duration = Duration::from_millis(9_000);

// =============================================================================
// TimeoutProfile
// =============================================================================

/// Predefined connect/request timeout pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutProfile {
    /// 5000 ms connect, 5000 ms request.
    #[default]
    Standard,
    /// 11000 ms connect, 9000 ms request, for slow gateways.
    Extended,
}

impl TimeoutProfile {
    /// Returns the connect timeout of this profile.
    pub const fn connect_timeout(&self) -> Duration {
        match self {
            Self::Standard => DEFAULT_CONNECT_TIMEOUT,
            Self::Extended => EXTENDED_CONNECT_TIMEOUT,
        }
    }

    /// Returns the request timeout of this profile.
    pub const fn request_timeout(&self) -> Duration {
        match self {
            Self::Standard => DEFAULT_REQUEST_TIMEOUT,
            Self::Extended => EXTENDED_REQUEST_TIMEOUT,
        }
    }

    /// Returns the profile name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for TimeoutProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// XmlDaConfig
// =============================================================================

/// OPC XML-DA client configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use xmlda_client::types::{TimeoutProfile, XmlDaConfig};
///
/// let config = XmlDaConfig::builder()
///     .server_url("http://localhost/XMLDA/opcxmldaserver.asmx")
///     .build()
///     .unwrap();
/// assert_eq!(config.default_locale, "en-US");
/// assert_eq!(config.connect_timeout, Duration::from_millis(5_000));
///
/// let slow = XmlDaConfig::builder()
///     .server_url("http://gateway:8080/xmlda")
///     .timeout_profile(TimeoutProfile::Extended)
///     .build()
///     .unwrap();
/// assert_eq!(slow.request_timeout, Duration::from_millis(9_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XmlDaConfig {
    /// Server URL (e.g., "http://localhost/XMLDA/opcxmldaserver.asmx").
    pub server_url: String,

    /// Locale applied to requests that carry none.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Connection timeout.
    #[serde(default = "default_connect_timeout")]
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Request (read) timeout.
    #[serde(default = "default_request_timeout")]
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// First value of the client request handle counter.
    #[serde(default)]
    pub handle_seed: u64,

    /// HTTP `User-Agent` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

impl XmlDaConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> XmlDaConfigBuilder {
        XmlDaConfigBuilder::default()
    }

    /// Creates a configuration with just the server URL.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    /// Validates this configuration.
    pub fn validate(&self) -> XmlDaResult<()> {
        if self.server_url.trim().is_empty() {
            return Err(XmlDaError::missing_server_url());
        }

        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(XmlDaError::configuration(
                ConfigurationError::invalid_server_url(
                    &self.server_url,
                    "Server URL must start with http:// or https://",
                ),
            ));
        }

        self.validate_settings()
    }

    /// Validates everything except the server URL.
    ///
    /// Used when the client is given an explicit transport, whose endpoint
    /// need not be an HTTP URL.
    pub fn validate_settings(&self) -> XmlDaResult<()> {
        if self.connect_timeout.is_zero() {
            return Err(XmlDaError::configuration(ConfigurationError::invalid_timeout(
                "connect_timeout",
                self.connect_timeout,
                "Connect timeout must be greater than 0",
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(XmlDaError::configuration(ConfigurationError::invalid_timeout(
                "request_timeout",
                self.request_timeout,
                "Request timeout must be greater than 0",
            )));
        }

        if self.default_locale.trim().is_empty() {
            return Err(XmlDaError::configuration(ConfigurationError::invalid_locale(
                &self.default_locale,
            )));
        }

        Ok(())
    }

    /// Returns the matching timeout profile, if the timeouts are a preset pair.
    pub fn timeout_profile(&self) -> Option<TimeoutProfile> {
        [TimeoutProfile::Standard, TimeoutProfile::Extended]
            .into_iter()
            .find(|p| {
                p.connect_timeout() == self.connect_timeout
                    && p.request_timeout() == self.request_timeout
            })
    }
}

impl Default for XmlDaConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            default_locale: default_locale(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            handle_seed: 0,
            user_agent: None,
        }
    }
}

// =============================================================================
// XmlDaConfigBuilder
// =============================================================================

/// Builder for `XmlDaConfig`.
#[derive(Debug, Default)]
pub struct XmlDaConfigBuilder {
    server_url: Option<String>,
    default_locale: Option<String>,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    handle_seed: Option<u64>,
    user_agent: Option<String>,
}

impl XmlDaConfigBuilder {
    /// Sets the server URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Sets the default locale.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets both timeouts from a preset profile.
    pub fn timeout_profile(self, profile: TimeoutProfile) -> Self {
        self.connect_timeout(profile.connect_timeout())
            .request_timeout(profile.request_timeout())
    }

    /// Uses the extended timeout profile.
    pub fn extended_timeouts(self) -> Self {
        self.timeout_profile(TimeoutProfile::Extended)
    }

    /// Sets the first request handle value.
    pub fn handle_seed(mut self, seed: u64) -> Self {
        self.handle_seed = Some(seed);
        self
    }

    /// Sets the HTTP user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Returns `true` if a server URL has been set.
    pub fn has_server_url(&self) -> bool {
        self.server_url.is_some()
    }

    /// Builds the configuration without validating it.
    pub fn build_unchecked(self) -> XmlDaConfig {
        XmlDaConfig {
            server_url: self.server_url.unwrap_or_default(),
            default_locale: self.default_locale.unwrap_or_else(default_locale),
            connect_timeout: self.connect_timeout.unwrap_or_else(default_connect_timeout),
            request_timeout: self.request_timeout.unwrap_or_else(default_request_timeout),
            handle_seed: self.handle_seed.unwrap_or(0),
            user_agent: self.user_agent,
        }
    }

    /// Builds the configuration.
    pub fn build(self) -> XmlDaResult<XmlDaConfig> {
        if self.server_url.is_none() {
            return Err(XmlDaError::missing_server_url());
        }

        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }
}

impl From<XmlDaConfig> for XmlDaConfigBuilder {
    fn from(config: XmlDaConfig) -> Self {
        Self {
            server_url: Some(config.server_url).filter(|url| !url.is_empty()),
            default_locale: Some(config.default_locale),
            connect_timeout: Some(config.connect_timeout),
            request_timeout: Some(config.request_timeout),
            handle_seed: Some(config.handle_seed),
            user_agent: config.user_agent,
        }
    }
}

// =============================================================================
// humantime_serde helper
// =============================================================================

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        humantime::format_duration(*duration)
            .to_string()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = XmlDaConfig::builder()
            .server_url("http://localhost/xmlda")
            .build()
            .unwrap();

        assert_eq!(config.default_locale, DEFAULT_LOCALE);
        assert_eq!(config.connect_timeout, Duration::from_millis(5_000));
        assert_eq!(config.request_timeout, Duration::from_millis(5_000));
        assert_eq!(config.handle_seed, 0);
        assert_eq!(config.timeout_profile(), Some(TimeoutProfile::Standard));
    }

    #[test]
    fn test_builder_missing_server_url() {
        let err = XmlDaConfig::builder().build().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("server_url"));
    }

    #[test]
    fn test_extended_profile() {
        let config = XmlDaConfig::builder()
            .server_url("https://gateway/xmlda")
            .extended_timeouts()
            .build()
            .unwrap();

        assert_eq!(config.connect_timeout, Duration::from_millis(11_000));
        assert_eq!(config.request_timeout, Duration::from_millis(9_000));
        assert_eq!(config.timeout_profile(), Some(TimeoutProfile::Extended));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = XmlDaConfig::new("opc.tcp://localhost:4840");
        assert!(config.validate().is_err());

        let config = XmlDaConfig {
            request_timeout: Duration::ZERO,
            ..XmlDaConfig::new("http://localhost/xmlda")
        };
        assert!(config.validate().is_err());

        let config = XmlDaConfig {
            default_locale: "  ".to_string(),
            ..XmlDaConfig::new("http://localhost/xmlda")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_settings_ignores_url() {
        let config = XmlDaConfig::new("mock://server");
        assert!(config.validate().is_err());
        assert!(config.validate_settings().is_ok());
    }

    #[test]
    fn test_custom_timeouts_have_no_profile() {
        let config = XmlDaConfig {
            connect_timeout: Duration::from_secs(1),
            ..XmlDaConfig::new("http://localhost/xmlda")
        };
        assert_eq!(config.timeout_profile(), None);
    }

    #[test]
    fn test_config_json_roundtrip_durations() {
        let json = r#"{
            "server_url": "http://localhost/xmlda",
            "connect_timeout": "11s",
            "request_timeout": "9s"
        }"#;
        let config: XmlDaConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.connect_timeout, EXTENDED_CONNECT_TIMEOUT);
        assert_eq!(config.request_timeout, EXTENDED_REQUEST_TIMEOUT);
        assert_eq!(config.default_locale, "en-US");

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"11s\""));
    }
}
