// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Response messages.
//!
//! Server-reported per-item errors are data: they live in each response's
//! `errors` list and in item `result_id` attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ItemProperty, ItemValue, OpcError, ReplyBase, ServerState};
use super::parse_timestamp;

// =============================================================================
// GetStatusResponse
// =============================================================================

/// `GetStatusResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetStatusResponse {
    /// Reply header.
    #[serde(rename = "GetStatusResult", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReplyBase>,

    /// Server status.
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServerStatus>,
}

impl GetStatusResponse {
    /// Returns the reported server state.
    pub fn server_state(&self) -> Option<ServerState> {
        self.result.as_ref().map(|r| r.server_state)
    }
}

/// Server status block of `GetStatusResponse`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Server start time.
    #[serde(rename = "@StartTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// Product version.
    #[serde(
        rename = "@ProductVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_version: Option<String>,

    /// Free-form status text.
    #[serde(rename = "StatusInfo", default, skip_serializing_if = "Option::is_none")]
    pub status_info: Option<String>,

    /// Vendor information.
    #[serde(rename = "VendorInfo", default, skip_serializing_if = "Option::is_none")]
    pub vendor_info: Option<String>,

    /// Locales the server supports.
    #[serde(rename = "SupportedLocaleIDs", default)]
    pub supported_locale_ids: Vec<String>,

    /// Interface versions the server supports.
    #[serde(rename = "SupportedInterfaceVersions", default)]
    pub supported_interface_versions: Vec<String>,
}

impl ServerStatus {
    /// Returns the parsed start time.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time.as_deref().and_then(parse_timestamp)
    }
}

// =============================================================================
// BrowseResponse
// =============================================================================

/// `BrowseResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseResponse {
    /// Continuation point for the next page.
    #[serde(
        rename = "@ContinuationPoint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continuation_point: Option<String>,

    /// More elements are available.
    #[serde(rename = "@MoreElements", default)]
    pub more_elements: bool,

    /// Reply header.
    #[serde(rename = "BrowseResult", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReplyBase>,

    /// Browsed elements.
    #[serde(rename = "Elements", default)]
    pub elements: Vec<BrowseElement>,

    /// Errors.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<OpcError>,
}

/// An element of a browse reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseElement {
    /// Display name.
    #[serde(rename = "@Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Item name.
    #[serde(rename = "@ItemName", default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// The element is a readable item.
    #[serde(rename = "@IsItem", default)]
    pub is_item: bool,

    /// The element has children.
    #[serde(rename = "@HasChildren", default)]
    pub has_children: bool,

    /// Requested properties.
    #[serde(rename = "Properties", default)]
    pub properties: Vec<ItemProperty>,
}

// =============================================================================
// GetPropertiesResponse
// =============================================================================

/// `GetPropertiesResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPropertiesResponse {
    /// Reply header.
    #[serde(
        rename = "GetPropertiesResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<ReplyBase>,

    /// One property list per requested item.
    #[serde(rename = "PropertyLists", default)]
    pub property_lists: Vec<PropertyReplyList>,

    /// Errors.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<OpcError>,
}

/// Properties of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyReplyList {
    /// Item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Item name.
    #[serde(rename = "@ItemName", default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// Result code for the item.
    #[serde(rename = "@ResultID", default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,

    /// Properties.
    #[serde(rename = "Properties", default)]
    pub properties: Vec<ItemProperty>,
}

impl PropertyReplyList {
    /// Finds a property by local name.
    pub fn property(&self, name: &str) -> Option<&ItemProperty> {
        self.properties.iter().find(|p| p.local_name() == name)
    }
}

// =============================================================================
// ReadResponse / WriteResponse
// =============================================================================

/// Item list of Read and Write replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyItemList {
    /// Reserved.
    #[serde(rename = "@Reserved", default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<String>,

    /// Items.
    #[serde(rename = "Items", default)]
    pub items: Vec<ItemValue>,
}

/// `ReadResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResponse {
    /// Reply header.
    #[serde(rename = "ReadResult", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReplyBase>,

    /// Read values.
    #[serde(rename = "RItemList", default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ReplyItemList>,

    /// Errors.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<OpcError>,
}

impl ReadResponse {
    /// Returns the read values.
    pub fn items(&self) -> &[ItemValue] {
        self.item_list.as_ref().map_or(&[], |l| l.items.as_slice())
    }

    /// Finds a value by item name.
    pub fn item(&self, item_name: &str) -> Option<&ItemValue> {
        self.items()
            .iter()
            .find(|i| i.item_name.as_deref() == Some(item_name))
    }
}

/// `WriteResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Reply header.
    #[serde(rename = "WriteResult", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReplyBase>,

    /// Per-item results, with values when requested.
    #[serde(rename = "RItemList", default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ReplyItemList>,

    /// Errors.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<OpcError>,
}

impl WriteResponse {
    /// Returns the per-item results.
    pub fn items(&self) -> &[ItemValue] {
        self.item_list.as_ref().map_or(&[], |l| l.items.as_slice())
    }
}

// =============================================================================
// SubscribeResponse
// =============================================================================

/// `SubscribeResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    /// Handle of the created subscription.
    #[serde(
        rename = "@ServerSubHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub server_sub_handle: Option<String>,

    /// Reply header.
    #[serde(rename = "SubscribeResult", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ReplyBase>,

    /// Per-item results.
    #[serde(rename = "RItemList", default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<SubscribeReplyItemList>,

    /// Errors.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<OpcError>,
}

impl SubscribeResponse {
    /// Returns the per-item results.
    pub fn items(&self) -> &[SubscribeItemValue] {
        self.item_list.as_ref().map_or(&[], |l| l.items.as_slice())
    }
}

/// Item list of a Subscribe reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeReplyItemList {
    /// Sampling rate applied to the whole list.
    #[serde(
        rename = "@RevisedSamplingRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revised_sampling_rate: Option<i32>,

    /// Items.
    #[serde(rename = "Items", default)]
    pub items: Vec<SubscribeItemValue>,
}

/// One item of a Subscribe reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeItemValue {
    /// Sampling rate applied to the item.
    #[serde(
        rename = "@RevisedSamplingRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revised_sampling_rate: Option<i32>,

    /// Current value, when requested.
    #[serde(rename = "ItemValue", default, skip_serializing_if = "Option::is_none")]
    pub item_value: Option<ItemValue>,
}

// =============================================================================
// SubscriptionPolledRefreshResponse
// =============================================================================

/// `SubscriptionPolledRefreshResponse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPolledRefreshResponse {
    /// The server dropped buffered values.
    #[serde(rename = "@DataBufferOverflow", default)]
    pub data_buffer_overflow: bool,

    /// Reply header.
    #[serde(
        rename = "SubscriptionPolledRefreshResult",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<ReplyBase>,

    /// Handles the server did not recognize.
    #[serde(rename = "InvalidServerSubHandles", default)]
    pub invalid_server_sub_handles: Vec<String>,

    /// Changed values, one list per subscription.
    #[serde(rename = "RItemList", default)]
    pub item_lists: Vec<SubscribePolledRefreshReplyItemList>,

    /// Errors.
    #[serde(rename = "Errors", default)]
    pub errors: Vec<OpcError>,
}

impl SubscriptionPolledRefreshResponse {
    /// Iterates over changed values of all subscriptions.
    pub fn items(&self) -> impl Iterator<Item = &ItemValue> {
        self.item_lists.iter().flat_map(|l| l.items.iter())
    }
}

/// Changed values of one subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribePolledRefreshReplyItemList {
    /// Subscription handle.
    #[serde(
        rename = "@SubscriptionHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subscription_handle: Option<String>,

    /// Items.
    #[serde(rename = "Items", default)]
    pub items: Vec<ItemValue>,
}

// =============================================================================
// SubscriptionCancelResponse
// =============================================================================

/// `SubscriptionCancelResponse`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCancelResponse {
    /// Echo of the client request handle.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,
}
