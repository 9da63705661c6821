// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # XML-DA Integration Tests
//!
//! Integration tests and shared test utilities for the OPC XML-DA client.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Canned reply envelopes and configuration documents
//!   - `assertions`: Envelope and error assertion helpers
//!   - `mocks`: Recording [`SoapTransport`](xmlda_client::SoapTransport) mock
//!   - `harness`: In-process fake XML-DA server over HTTP
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p xmlda-tests
//!
//! # Run specific test suite
//! cargo test -p xmlda-tests --test integration_client
//! cargo test -p xmlda-tests --test integration_http
//! cargo test -p xmlda-tests --test integration_config
//!
//! # Run against a real server
//! XMLDA_TEST_SERVER_URL=http://host/XMLDA/opcxmldaserver.asmx \
//!     cargo test -p xmlda-tests --test integration_live -- --ignored
//! ```
//!
//! ## Test Categories
//!
//! ### Client Tests (`integration_client.rs`)
//! - Request normalization on every operation
//! - Default and explicit request equivalence
//! - Handle uniqueness under concurrency
//! - Fault and decoding error propagation
//!
//! ### HTTP Tests (`integration_http.rs`)
//! - SOAPAction and Content-Type headers
//! - Fault replies with HTTP 500
//! - HTTP status and connection failures
//!
//! ### Config Tests (`integration_config.rs`)
//! - YAML, TOML and JSON loading
//! - Placeholder resolution and environment overrides
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use xmlda_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let mock = Arc::new(MockSoapTransport::new());
//!     let client = mock_client(mock.clone());
//!     client.get_status().await.unwrap();
//!     mock.last_envelope().unwrap().assert_attribute("LocaleID", "en-US");
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, temp_test_dir};
}
