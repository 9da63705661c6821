// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC XML-DA 1.01 client.
//!
//! This crate talks to OPC XML-DA servers over SOAP 1.1 / HTTP. It exposes
//! the eight XML-DA operations as typed async calls and fills in the request
//! fields a server expects but callers tend to omit.
//!
//! # Features
//!
//! - GetStatus, Browse, GetProperties, Read, Write, Subscribe,
//!   SubscriptionPolledRefresh and SubscriptionCancel
//! - Default locale and generated client request handles
//! - Error text, diagnostics, item names and item times always requested
//! - Pluggable transport for testing
//!
//! # Error Handling
//!
//! ```text
//! XmlDaError
//! ├── Configuration - Invalid or missing construction parameters
//! ├── Transport     - Connection, timeout and HTTP status failures
//! ├── Fault         - SOAP Fault returned by the server
//! ├── Encoding      - Request could not be serialized
//! └── Decoding      - Reply did not match the expected response
//! ```
//!
//! Per-item errors inside a reply are returned as data, not as errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use xmlda_client::{ItemValue, Write, XmlDaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = XmlDaClient::builder()
//!         .server_url("http://localhost/XMLDA/opcxmldaserver.asmx")
//!         .build()?;
//!
//!     let status = client.get_status().await?;
//!     println!("Server state: {:?}", status.server_state());
//!
//!     let write = Write::items(vec![ItemValue::new("Dynamic/Analog Types/Double", 50000.0)]);
//!     let reply = client.write(write).await?;
//!     println!("Write results: {:?}", reply.items());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod messages;
pub mod soap;
pub mod types;

// Re-export commonly used types
pub use error::{
    ConfigurationError, DecodingError, EncodingError, ErrorCode, ErrorSeverity, SoapFault,
    TransportError, XmlDaError, XmlDaResult,
};

pub use types::{
    TimeoutProfile, XmlDaConfig, XmlDaConfigBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_LOCALE,
    DEFAULT_REQUEST_TIMEOUT, EXTENDED_CONNECT_TIMEOUT, EXTENDED_REQUEST_TIMEOUT,
};

pub use client::{
    ClientStats, HttpSoapTransport, Normalize, RequestHandleGenerator, RequestNormalizer,
    SoapTransport, XmlDaClient, XmlDaClientBuilder,
};

pub use soap::{SoapAction, XMLDA_NAMESPACE};

pub use messages::{
    Browse, BrowseElement, BrowseFilter, BrowseResponse, GetProperties, GetPropertiesResponse,
    GetStatus, GetStatusResponse, ItemIdentifier, ItemProperty, ItemValue, LimitBits, OpcError,
    OpcQuality, PropertyReplyList, QualityBits, Read, ReadRequestItem, ReadRequestItemList,
    ReadResponse, ReplyBase, ReplyItemList, RequestOptions, ServerState, ServerStatus, Subscribe,
    SubscribeItemValue, SubscribePolledRefreshReplyItemList, SubscribeReplyItemList,
    SubscribeRequestItem, SubscribeRequestItemList, SubscribeResponse, SubscriptionCancel,
    SubscriptionCancelResponse, SubscriptionPolledRefresh, SubscriptionPolledRefreshResponse,
    TypedValue, Write, WriteRequestItemList, WriteResponse, XmlDaRequest, XmlValue,
};
