// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Loading of client configuration from files and the environment.
//!
//! # Loading Pipeline
//!
//! 1. Read the file and resolve `${VAR}` / `${VAR:default}` placeholders
//! 2. Parse YAML, TOML or JSON into an [`XmlDaConfig`]
//! 3. Apply environment variable overrides
//! 4. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! XMLDA_SERVER_URL=http://plc-gateway/XMLDA/opcxmldaserver.asmx
//! XMLDA_CONNECT_TIMEOUT_MS=11000
//! XMLDA_REQUEST_TIMEOUT_MS=9000
//! XMLDA_TIMEOUT_PROFILE=extended
//! XMLDA_DEFAULT_LOCALE=de-DE
//! XMLDA_HANDLE_SEED=1000
//! XMLDA_USER_AGENT=line-3-collector
//! ```

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use xmlda_client::{TimeoutProfile, XmlDaConfig};

use crate::error::{ConfigError, ConfigResult};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "XMLDA";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Loads [`XmlDaConfig`] values.
///
/// # Examples
///
/// ```no_run
/// use xmlda_config::loader::ConfigLoader;
///
/// let loader = ConfigLoader::new();
/// let config = loader.load("xmlda.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to resolve `${VAR}` placeholders.
    resolve_placeholders: bool,

    /// Whether to apply `PREFIX_*` overrides.
    apply_overrides: bool,
}

impl ConfigLoader {
    /// Creates a loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_placeholders: true,
            apply_overrides: true,
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enables or disables placeholder resolution.
    pub fn with_placeholders(mut self, enabled: bool) -> Self {
        self.resolve_placeholders = enabled;
        self
    }

    /// Enables or disables environment overrides.
    pub fn with_env_overrides(mut self, enabled: bool) -> Self {
        self.apply_overrides = enabled;
        self
    }

    /// Returns the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Loads configuration from a file.
    ///
    /// The format follows the extension: `.yaml`/`.yml`, `.toml` or `.json`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<XmlDaConfig> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading XML-DA client configuration");

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let config = self.parse(&content, format).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })?;

        self.finish(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<XmlDaConfig> {
        let config = self.parse(content, format)?;
        self.finish(config)
    }

    /// Builds configuration from the environment alone.
    ///
    /// `PREFIX_SERVER_URL` is required.
    pub fn load_from_env(&self) -> ConfigResult<XmlDaConfig> {
        let mut config = XmlDaConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(&self, content: &str, format: ConfigFormat) -> ConfigResult<XmlDaConfig> {
        let content = if self.resolve_placeholders {
            resolve_env_placeholders(content)
        } else {
            content.to_string()
        };

        match format {
            ConfigFormat::Yaml => parse_yaml(&content),
            ConfigFormat::Toml => {
                toml::from_str(&content).map_err(|e| ConfigError::serialization(e.to_string()))
            }
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::serialization(e.to_string())),
        }
    }

    fn finish(&self, mut config: XmlDaConfig) -> ConfigResult<XmlDaConfig> {
        if self.apply_overrides {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate()?;

        debug!(
            server_url = %config.server_url,
            default_locale = %config.default_locale,
            connect_timeout_ms = config.connect_timeout.as_millis() as u64,
            request_timeout_ms = config.request_timeout.as_millis() as u64,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn var(&self, suffix: &str) -> Option<(String, String)> {
        let name = format!("{}_{}", self.env_prefix, suffix);
        env::var(&name).ok().map(|value| (name, value))
    }

    /// Applies `PREFIX_*` environment variables to `config`.
    pub fn apply_env_overrides(&self, config: &mut XmlDaConfig) -> ConfigResult<()> {
        if let Some((_, value)) = self.var("SERVER_URL") {
            config.server_url = value;
        }

        // A profile sets both timeouts; explicit millisecond values win.
        if let Some((name, value)) = self.var("TIMEOUT_PROFILE") {
            let profile = match value.to_ascii_lowercase().as_str() {
                "standard" => TimeoutProfile::Standard,
                "extended" => TimeoutProfile::Extended,
                _ => {
                    return Err(ConfigError::invalid_env_var(
                        name,
                        "expected 'standard' or 'extended'",
                    ))
                }
            };
            config.connect_timeout = profile.connect_timeout();
            config.request_timeout = profile.request_timeout();
        }

        if let Some((name, value)) = self.var("CONNECT_TIMEOUT_MS") {
            config.connect_timeout = parse_millis(&name, &value)?;
        }
        if let Some((name, value)) = self.var("REQUEST_TIMEOUT_MS") {
            config.request_timeout = parse_millis(&name, &value)?;
        }

        if let Some((_, value)) = self.var("DEFAULT_LOCALE") {
            config.default_locale = value;
        }

        if let Some((name, value)) = self.var("HANDLE_SEED") {
            config.handle_seed = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(name, "expected a non-negative integer"))?;
        }

        if let Some((_, value)) = self.var("USER_AGENT") {
            config.user_agent = Some(value);
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
///
/// Unset variables without a default are left as written.
pub fn resolve_env_placeholders(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let body = &after[..end];
        let (name, default) = match body.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };

        match (env::var(name), default) {
            (Ok(value), _) => result.push_str(&value),
            (Err(_), Some(default)) => result.push_str(default),
            (Err(_), None) => {
                warn!(variable = name, "Environment variable not set");
                result.push_str(&rest[start..start + 2 + end + 1]);
            }
        }

        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

fn parse_millis(name: &str, value: &str) -> ConfigResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::invalid_env_var(name, "expected milliseconds"))
}

fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
///
/// # Examples
///
/// ```no_run
/// use xmlda_config::loader::load_config;
///
/// let config = load_config("xmlda.toml").unwrap();
/// ```
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<XmlDaConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with the specified format.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<XmlDaConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

/// Builds configuration from `XMLDA_*` environment variables.
pub fn load_from_env() -> ConfigResult<XmlDaConfig> {
    ConfigLoader::new().load_from_env()
}

// =============================================================================
// Tests
// =============================================================================
