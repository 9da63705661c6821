// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Structures shared by several XML-DA messages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;
use super::value::XmlValue;

// =============================================================================
// RequestOptions
// =============================================================================

/// The `Options` block of Read, Write, Subscribe and SubscriptionPolledRefresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Return error text alongside result codes.
    #[serde(rename = "@ReturnErrorText", default)]
    pub return_error_text: bool,

    /// Return vendor diagnostic information.
    #[serde(rename = "@ReturnDiagnosticInfo", default)]
    pub return_diagnostic_info: bool,

    /// Return per-item timestamps.
    #[serde(rename = "@ReturnItemTime", default)]
    pub return_item_time: bool,

    /// Echo item paths in the reply.
    #[serde(rename = "@ReturnItemPath", default)]
    pub return_item_path: bool,

    /// Echo item names in the reply.
    #[serde(rename = "@ReturnItemName", default)]
    pub return_item_name: bool,

    /// Deadline after which the server may abandon the request.
    #[serde(
        rename = "@RequestDeadline",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_deadline: Option<String>,

    /// Client request handle, echoed in the reply.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,

    /// Locale for error text.
    #[serde(rename = "@LocaleID", default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<String>,
}

impl RequestOptions {
    /// Sets the client request handle.
    pub fn with_client_request_handle(mut self, handle: impl Into<String>) -> Self {
        self.client_request_handle = Some(handle.into());
        self
    }

    /// Sets the locale.
    pub fn with_locale_id(mut self, locale: impl Into<String>) -> Self {
        self.locale_id = Some(locale.into());
        self
    }

    /// Sets the request deadline.
    pub fn with_request_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.request_deadline = Some(deadline.to_rfc3339());
        self
    }
}

// =============================================================================
// ItemIdentifier
// =============================================================================

/// Item path and name pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIdentifier {
    /// Item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Item name.
    #[serde(rename = "@ItemName", default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
}

impl ItemIdentifier {
    /// Creates an identifier for an item name.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_path: None,
            item_name: Some(item_name.into()),
        }
    }

    /// Sets the item path.
    pub fn with_item_path(mut self, path: impl Into<String>) -> Self {
        self.item_path = Some(path.into());
        self
    }
}

// =============================================================================
// ItemValue
// =============================================================================

/// A value of one item, in Write requests and in replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemValue {
    /// Requested value type.
    #[serde(
        rename = "@ValueTypeQualifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub value_type_qualifier: Option<String>,

    /// Item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Item name.
    #[serde(rename = "@ItemName", default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// Client item handle.
    #[serde(
        rename = "@ClientItemHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_item_handle: Option<String>,

    /// Value timestamp, as sent by the server.
    #[serde(rename = "@Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Item result code (qualified name, e.g. `E_UNKNOWNITEMNAME`).
    #[serde(rename = "@ResultID", default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    /// Vendor diagnostics.
    #[serde(
        rename = "DiagnosticInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub diagnostic_info: Option<String>,

    /// The value.
    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<XmlValue>,

    /// Quality.
    #[serde(rename = "Quality", default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<OpcQuality>,
}

impl ItemValue {
    /// Creates an item value for writing.
    pub fn new(item_name: impl Into<String>, value: impl Into<XmlValue>) -> Self {
        Self {
            item_name: Some(item_name.into()),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Sets the item path.
    pub fn with_item_path(mut self, path: impl Into<String>) -> Self {
        self.item_path = Some(path.into());
        self
    }

    /// Sets the client item handle.
    pub fn with_client_item_handle(mut self, handle: impl Into<String>) -> Self {
        self.client_item_handle = Some(handle.into());
        self
    }

    /// Returns the parsed timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    /// Returns `true` if the quality is good, or no quality was reported.
    pub fn is_good(&self) -> bool {
        self.quality
            .as_ref()
            .map_or(self.result_id.is_none(), OpcQuality::is_good)
    }

    /// Returns the result code without its namespace prefix.
    pub fn result_code(&self) -> Option<&str> {
        self.result_id.as_deref().map(local_part)
    }
}

// =============================================================================
// OpcQuality
// =============================================================================

/// Quality of an item value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcQuality {
    /// Quality bits.
    #[serde(rename = "@QualityField", default)]
    pub quality_field: QualityBits,

    /// Limit bits.
    #[serde(rename = "@LimitField", default)]
    pub limit_field: LimitBits,

    /// Vendor bits.
    #[serde(rename = "@VendorField", default)]
    pub vendor_field: u8,
}

impl OpcQuality {
    /// Returns `true` for any good quality.
    pub fn is_good(&self) -> bool {
        self.quality_field.is_good()
    }
}

/// Quality bits of [`OpcQuality`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QualityBits {
    /// Bad, no specific reason.
    Bad,
    /// Bad, server configuration problem.
    BadConfigurationError,
    /// Bad, input not connected.
    BadNotConnected,
    /// Bad, device failure.
    BadDeviceFailure,
    /// Bad, sensor failure.
    BadSensorFailure,
    /// Bad, last known value.
    BadLastKnownValue,
    /// Bad, communication failure.
    BadCommFailure,
    /// Bad, out of service.
    BadOutOfService,
    /// Bad, waiting for initial data.
    BadWaitingForInitialData,
    /// Uncertain, no specific reason.
    Uncertain,
    /// Uncertain, last usable value.
    UncertainLastUsableValue,
    /// Uncertain, sensor not accurate.
    UncertainSensorNotAccurate,
    /// Uncertain, engineering units exceeded.
    #[serde(rename = "uncertainEUExceeded")]
    UncertainEuExceeded,
    /// Uncertain, sub-normal.
    UncertainSubNormal,
    /// Good.
    #[default]
    Good,
    /// Good, local override.
    GoodLocalOverride,
}

impl QualityBits {
    /// Returns `true` for good qualities.
    pub const fn is_good(&self) -> bool {
        matches!(self, Self::Good | Self::GoodLocalOverride)
    }

    /// Returns `true` for uncertain qualities.
    pub const fn is_uncertain(&self) -> bool {
        matches!(
            self,
            Self::Uncertain
                | Self::UncertainLastUsableValue
                | Self::UncertainSensorNotAccurate
                | Self::UncertainEuExceeded
                | Self::UncertainSubNormal
        )
    }

    /// Returns `true` for bad qualities.
    pub const fn is_bad(&self) -> bool {
        !self.is_good() && !self.is_uncertain()
    }
}

/// Limit bits of [`OpcQuality`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitBits {
    /// Not limited.
    #[default]
    None,
    /// At low limit.
    Low,
    /// At high limit.
    High,
    /// Constant.
    Constant,
}

// =============================================================================
// OpcError
// =============================================================================

/// An entry of a reply's `Errors` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcError {
    /// Error code (qualified name).
    #[serde(rename = "@ID")]
    pub id: String,

    /// Error text.
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl OpcError {
    /// Returns the error code without its namespace prefix.
    pub fn code(&self) -> &str {
        local_part(&self.id)
    }
}

impl fmt::Display for OpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}: {}", self.code(), text),
            None => write!(f, "{}", self.code()),
        }
    }
}

// =============================================================================
// ItemProperty
// =============================================================================

/// A property of an item, returned by Browse and GetProperties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProperty {
    /// Property name (qualified name, e.g. `dataType`).
    #[serde(rename = "@Name")]
    pub name: String,

    /// Description.
    #[serde(rename = "@Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Item path of the property item.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Item name of the property item.
    #[serde(rename = "@ItemName", default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// Result code.
    #[serde(rename = "@ResultID", default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    /// Property value, present when values were requested.
    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<XmlValue>,
}

impl ItemProperty {
    /// Returns the property name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }
}

// =============================================================================
// BrowseFilter
// =============================================================================

/// Element kinds returned by Browse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrowseFilter {
    /// Branches and items.
    #[default]
    All,
    /// Branches only.
    Branch,
    /// Items only.
    Item,
}

// =============================================================================
// ServerState / ReplyBase
// =============================================================================

/// Server state reported in every reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerState {
    /// Running normally.
    Running,
    /// Failed.
    Failed,
    /// No configuration loaded.
    NoConfig,
    /// Suspended.
    Suspended,
    /// Test mode.
    Test,
    /// Communication fault with the underlying devices.
    CommFault,
}

impl ServerState {
    /// Returns the wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Failed => "failed",
            Self::NoConfig => "noConfig",
            Self::Suspended => "suspended",
            Self::Test => "test",
            Self::CommFault => "commFault",
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Common reply header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBase {
    /// Time the server received the request.
    #[serde(rename = "@RcvTime", default, skip_serializing_if = "Option::is_none")]
    pub rcv_time: Option<String>,

    /// Time the server sent the reply.
    #[serde(rename = "@ReplyTime", default, skip_serializing_if = "Option::is_none")]
    pub reply_time: Option<String>,

    /// Echo of the client request handle.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,

    /// Locale the server actually used.
    #[serde(
        rename = "@RevisedLocaleID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revised_locale_id: Option<String>,

    /// Server state.
    #[serde(rename = "@ServerState")]
    pub server_state: ServerState,
}

impl ReplyBase {
    /// Returns the parsed receive time.
    pub fn rcv_time(&self) -> Option<DateTime<Utc>> {
        self.rcv_time.as_deref().and_then(parse_timestamp)
    }

    /// Returns the parsed reply time.
    pub fn reply_time(&self) -> Option<DateTime<Utc>> {
        self.reply_time.as_deref().and_then(parse_timestamp)
    }
}

pub(crate) fn local_part(qname: &str) -> &str {
    qname.rsplit(':').next().unwrap_or(qname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_classification() {
        assert!(QualityBits::Good.is_good());
        assert!(QualityBits::UncertainEuExceeded.is_uncertain());
        assert!(QualityBits::BadCommFailure.is_bad());
        assert!(!QualityBits::GoodLocalOverride.is_bad());
    }

    #[test]
    fn test_item_value_is_good() {
        let mut item = ItemValue::new("Static/Float", 1.0);
        assert!(item.is_good());

        item.result_id = Some("s:E_UNKNOWNITEMNAME".into());
        assert!(!item.is_good());
        assert_eq!(item.result_code(), Some("E_UNKNOWNITEMNAME"));

        item.quality = Some(OpcQuality {
            quality_field: QualityBits::BadNotConnected,
            ..Default::default()
        });
        assert!(!item.is_good());
    }

    #[test]
    fn test_opc_error_display() {
        let error = OpcError {
            id: "E_FAIL".into(),
            text: Some("Unspecified error".into()),
        };
        assert_eq!(error.to_string(), "E_FAIL: Unspecified error");
    }

    #[test]
    fn test_reply_base_times() {
        let reply = ReplyBase {
            rcv_time: Some("2024-03-01T10:00:00.5+01:00".into()),
            reply_time: Some("2024-03-01T09:00:01".into()),
            client_request_handle: None,
            revised_locale_id: None,
            server_state: ServerState::Running,
        };

        let rcv = reply.rcv_time().unwrap();
        let sent = reply.reply_time().unwrap();
        assert_eq!((sent - rcv).num_milliseconds(), 500);
        assert_eq!(reply.server_state.to_string(), "running");
    }
}
