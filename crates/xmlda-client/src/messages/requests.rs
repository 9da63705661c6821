// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request messages.
//!
//! Field order matters for serialization: attributes are declared before
//! child elements in every struct.

use serde::{Deserialize, Serialize};

use super::common::{BrowseFilter, ItemIdentifier, ItemValue, RequestOptions};
use super::responses::{
    BrowseResponse, GetPropertiesResponse, GetStatusResponse, ReadResponse, SubscribeResponse,
    SubscriptionCancelResponse, SubscriptionPolledRefreshResponse, WriteResponse,
};
use super::XmlDaRequest;
use crate::soap::SoapAction;

// =============================================================================
// GetStatus
// =============================================================================

/// `GetStatus` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetStatus {
    /// Locale for status text.
    #[serde(rename = "@LocaleID", default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<String>,

    /// Client request handle.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,
}

impl GetStatus {
    /// Creates a request for the given locale.
    pub fn in_locale(locale: impl Into<String>) -> Self {
        Self {
            locale_id: Some(locale.into()),
            client_request_handle: None,
        }
    }
}

impl XmlDaRequest for GetStatus {
    type Response = GetStatusResponse;
    const ACTION: SoapAction = SoapAction::GetStatus;

    fn client_request_handle(&self) -> Option<&str> {
        self.client_request_handle.as_deref()
    }
}

// =============================================================================
// Browse
// =============================================================================

/// `Browse` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browse {
    /// Locale for error text.
    #[serde(rename = "@LocaleID", default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<String>,

    /// Client request handle.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,

    /// Path of the branch to browse.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Name of the branch to browse; root when absent.
    #[serde(rename = "@ItemName", default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    /// Continuation point from a previous reply.
    #[serde(
        rename = "@ContinuationPoint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continuation_point: Option<String>,

    /// Maximum number of elements; 0 means no limit.
    #[serde(rename = "@MaxElementsReturned", default)]
    pub max_elements_returned: i32,

    /// Element kinds to return.
    #[serde(rename = "@BrowseFilter", default)]
    pub browse_filter: BrowseFilter,

    /// Wildcard filter on element names.
    #[serde(
        rename = "@ElementNameFilter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub element_name_filter: Option<String>,

    /// Vendor-specific filter.
    #[serde(
        rename = "@VendorFilter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor_filter: Option<String>,

    /// Return all properties of each element.
    #[serde(rename = "@ReturnAllProperties", default)]
    pub return_all_properties: bool,

    /// Return property values.
    #[serde(rename = "@ReturnPropertyValues", default)]
    pub return_property_values: bool,

    /// Return error text.
    #[serde(rename = "@ReturnErrorText", default)]
    pub return_error_text: bool,

    /// Properties to return.
    #[serde(rename = "PropertyNames", default, skip_serializing_if = "Vec::is_empty")]
    pub property_names: Vec<String>,
}

impl Browse {
    /// Creates a request browsing the given branch.
    pub fn branch(item_name: impl Into<String>) -> Self {
        Self {
            item_name: Some(item_name.into()),
            ..Default::default()
        }
    }
}

impl XmlDaRequest for Browse {
    type Response = BrowseResponse;
    const ACTION: SoapAction = SoapAction::Browse;

    fn client_request_handle(&self) -> Option<&str> {
        self.client_request_handle.as_deref()
    }
}

// =============================================================================
// GetProperties
// =============================================================================

/// `GetProperties` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProperties {
    /// Locale for error text.
    #[serde(rename = "@LocaleID", default, skip_serializing_if = "Option::is_none")]
    pub locale_id: Option<String>,

    /// Client request handle.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,

    /// Default item path for the listed items.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Return all properties.
    #[serde(rename = "@ReturnAllProperties", default)]
    pub return_all_properties: bool,

    /// Return property values.
    #[serde(rename = "@ReturnPropertyValues", default)]
    pub return_property_values: bool,

    /// Return error text.
    #[serde(rename = "@ReturnErrorText", default)]
    pub return_error_text: bool,

    /// Items whose properties are requested.
    #[serde(rename = "ItemIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub item_ids: Vec<ItemIdentifier>,

    /// Properties to return.
    #[serde(rename = "PropertyNames", default, skip_serializing_if = "Vec::is_empty")]
    pub property_names: Vec<String>,
}

impl GetProperties {
    /// Creates a request for all properties and values of the given items.
    pub fn all_of<I, S>(item_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            return_all_properties: true,
            return_property_values: true,
            item_ids: item_names.into_iter().map(ItemIdentifier::new).collect(),
            ..Default::default()
        }
    }
}

impl XmlDaRequest for GetProperties {
    type Response = GetPropertiesResponse;
    const ACTION: SoapAction = SoapAction::GetProperties;

    fn client_request_handle(&self) -> Option<&str> {
        self.client_request_handle.as_deref()
    }
}

// =============================================================================
// Read
// =============================================================================

/// `Read` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    /// Request options.
    #[serde(rename = "Options", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,

    /// Items to read.
    #[serde(rename = "ItemList", default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ReadRequestItemList>,
}

impl Read {
    /// Creates a request reading the given items.
    pub fn items<I, S>(item_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: None,
            item_list: Some(ReadRequestItemList {
                items: item_names.into_iter().map(ReadRequestItem::new).collect(),
                ..Default::default()
            }),
        }
    }
}

impl XmlDaRequest for Read {
    type Response = ReadResponse;
    const ACTION: SoapAction = SoapAction::Read;

    fn client_request_handle(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.client_request_handle.as_deref())
    }
}

/// Item list of a Read request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRequestItemList {
    /// Default item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Default requested type.
    #[serde(rename = "@ReqType", default, skip_serializing_if = "Option::is_none")]
    pub req_type: Option<String>,

    /// Default maximum cache age in milliseconds.
    #[serde(rename = "@MaxAge", default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i32>,

    /// Items.
    #[serde(rename = "Items", default)]
    pub items: Vec<ReadRequestItem>,
}

/// One item of a Read request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRequestItem {
    /// Item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Requested type.
    #[serde(rename = "@ReqType", default, skip_serializing_if = "Option::is_none")]
    pub req_type: Option<String>,

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

    /// Maximum cache age in milliseconds.
    #[serde(rename = "@MaxAge", default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i32>,
}

impl ReadRequestItem {
    /// Creates an item by name.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: Some(item_name.into()),
            ..Default::default()
        }
    }

    /// Sets the client item handle.
    pub fn with_client_item_handle(mut self, handle: impl Into<String>) -> Self {
        self.client_item_handle = Some(handle.into());
        self
    }
}

// =============================================================================
// Write
// =============================================================================

/// `Write` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Write {
    /// Read back written values in the reply.
    #[serde(rename = "@ReturnValuesOnReply", default)]
    pub return_values_on_reply: bool,

    /// Request options.
    #[serde(rename = "Options", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,

    /// Items to write.
    #[serde(rename = "ItemList", default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<WriteRequestItemList>,
}

impl Write {
    /// Creates a request writing the given values.
    pub fn items(items: Vec<ItemValue>) -> Self {
        Self {
            return_values_on_reply: false,
            options: None,
            item_list: Some(WriteRequestItemList {
                item_path: None,
                items,
            }),
        }
    }
}

impl XmlDaRequest for Write {
    type Response = WriteResponse;
    const ACTION: SoapAction = SoapAction::Write;

    fn client_request_handle(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.client_request_handle.as_deref())
    }
}

/// Item list of a Write request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequestItemList {
    /// Default item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Items.
    #[serde(rename = "Items", default)]
    pub items: Vec<ItemValue>,
}

// =============================================================================
// Subscribe
// =============================================================================

/// `Subscribe` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscribe {
    /// Return current values in the reply.
    #[serde(rename = "@ReturnValuesOnReply", default)]
    pub return_values_on_reply: bool,

    /// Interval in milliseconds after which an unpolled subscription may be dropped.
    #[serde(
        rename = "@SubscriptionPingRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subscription_ping_rate: Option<i32>,

    /// Request options.
    #[serde(rename = "Options", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,

    /// Items to subscribe.
    #[serde(rename = "ItemList", default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<SubscribeRequestItemList>,
}

impl Subscribe {
    /// Creates a request subscribing the given items.
    pub fn items<I, S>(item_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            item_list: Some(SubscribeRequestItemList {
                items: item_names
                    .into_iter()
                    .map(SubscribeRequestItem::new)
                    .collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl XmlDaRequest for Subscribe {
    type Response = SubscribeResponse;
    const ACTION: SoapAction = SoapAction::Subscribe;

    fn client_request_handle(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.client_request_handle.as_deref())
    }
}

/// Item list of a Subscribe request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequestItemList {
    /// Default item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Default requested type.
    #[serde(rename = "@ReqType", default, skip_serializing_if = "Option::is_none")]
    pub req_type: Option<String>,

    /// Default deadband in percent.
    #[serde(rename = "@Deadband", default, skip_serializing_if = "Option::is_none")]
    pub deadband: Option<f32>,

    /// Default sampling rate in milliseconds.
    #[serde(
        rename = "@RequestedSamplingRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requested_sampling_rate: Option<i32>,

    /// Default buffering flag.
    #[serde(
        rename = "@EnableBuffering",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_buffering: Option<bool>,

    /// Items.
    #[serde(rename = "Items", default)]
    pub items: Vec<SubscribeRequestItem>,
}

/// One item of a Subscribe request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequestItem {
    /// Item path.
    #[serde(rename = "@ItemPath", default, skip_serializing_if = "Option::is_none")]
    pub item_path: Option<String>,

    /// Requested type.
    #[serde(rename = "@ReqType", default, skip_serializing_if = "Option::is_none")]
    pub req_type: Option<String>,

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

    /// Deadband in percent.
    #[serde(rename = "@Deadband", default, skip_serializing_if = "Option::is_none")]
    pub deadband: Option<f32>,

    /// Sampling rate in milliseconds.
    #[serde(
        rename = "@RequestedSamplingRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requested_sampling_rate: Option<i32>,

    /// Buffering flag.
    #[serde(
        rename = "@EnableBuffering",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_buffering: Option<bool>,
}

impl SubscribeRequestItem {
    /// Creates an item by name.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: Some(item_name.into()),
            ..Default::default()
        }
    }

    /// Sets the client item handle.
    pub fn with_client_item_handle(mut self, handle: impl Into<String>) -> Self {
        self.client_item_handle = Some(handle.into());
        self
    }
}

// =============================================================================
// SubscriptionPolledRefresh
// =============================================================================

/// `SubscriptionPolledRefresh` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPolledRefresh {
    /// Earliest time the server may reply.
    #[serde(rename = "@HoldTime", default, skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<String>,

    /// Milliseconds after the hold time to wait for changes.
    #[serde(rename = "@WaitTime", default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<i32>,

    /// Return all items, not only changed ones.
    #[serde(rename = "@ReturnAllItems", default)]
    pub return_all_items: bool,

    /// Request options.
    #[serde(rename = "Options", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,

    /// Subscriptions to poll.
    #[serde(rename = "ServerSubHandles", default)]
    pub server_sub_handles: Vec<String>,
}

impl SubscriptionPolledRefresh {
    /// Creates a request polling the given subscriptions.
    pub fn handles<I, S>(server_sub_handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            server_sub_handles: server_sub_handles.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl XmlDaRequest for SubscriptionPolledRefresh {
    type Response = SubscriptionPolledRefreshResponse;
    const ACTION: SoapAction = SoapAction::SubscriptionPolledRefresh;

    fn client_request_handle(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.client_request_handle.as_deref())
    }
}

// =============================================================================
// SubscriptionCancel
// =============================================================================

/// `SubscriptionCancel` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCancel {
    /// Subscription to cancel.
    #[serde(
        rename = "@ServerSubHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub server_sub_handle: Option<String>,

    /// Client request handle.
    #[serde(
        rename = "@ClientRequestHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_request_handle: Option<String>,
}

impl SubscriptionCancel {
    /// Creates a request cancelling the given subscription.
    pub fn handle(server_sub_handle: impl Into<String>) -> Self {
        Self {
            server_sub_handle: Some(server_sub_handle.into()),
            client_request_handle: None,
        }
    }
}

impl XmlDaRequest for SubscriptionCancel {
    type Response = SubscriptionCancelResponse;
    const ACTION: SoapAction = SoapAction::SubscriptionCancel;

    fn client_request_handle(&self) -> Option<&str> {
        self.client_request_handle.as_deref()
    }
}
