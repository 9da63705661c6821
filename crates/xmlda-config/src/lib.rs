// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading for the OPC XML-DA client.
//!
//! Produces a validated [`XmlDaConfig`] from a YAML, TOML or JSON file,
//! from a string, or from `XMLDA_*` environment variables.
//!
//! # Example Configuration
//!
//! ```yaml
//! server_url: ${XMLDA_HOST:http://localhost}/XMLDA/opcxmldaserver.asmx
//! default_locale: en-US
//! connect_timeout: 11s
//! request_timeout: 9s
//! handle_seed: 0
//! ```
//!
//! # Example
//!
//! ```no_run
//! use xmlda_config::{load_config, ConfigLoader};
//!
//! let config = load_config("xmlda.yaml").unwrap();
//!
//! let config = ConfigLoader::new()
//!     .with_env_prefix("LINE3_XMLDA")
//!     .load("xmlda.toml")
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    load_config, load_config_str, load_from_env, resolve_env_placeholders, ConfigFormat,
    ConfigLoader, DEFAULT_ENV_PREFIX,
};

pub use xmlda_client::XmlDaConfig;
