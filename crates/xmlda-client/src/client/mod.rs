// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC XML-DA client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        XmlDaClient                              │
//! │        (eight operations, convenience and customize forms)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     RequestNormalizer                           │
//! │          (default locale, handle counter, return flags)         │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 soap::encode / soap::decode                     │
//! │           (SOAP 1.1 envelope, action table, faults)             │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      SoapTransport                              │
//! │             (HttpSoapTransport, or a test double)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod http_transport;
mod normalizer;
mod stats;
mod transport;
mod wrapper;

pub use http_transport::{HttpSoapTransport, SOAP_ACTION_HEADER, SOAP_CONTENT_TYPE};
pub use normalizer::{Normalize, RequestHandleGenerator, RequestNormalizer};
pub use stats::ClientStats;
pub use transport::SoapTransport;
pub use wrapper::{XmlDaClient, XmlDaClientBuilder};
