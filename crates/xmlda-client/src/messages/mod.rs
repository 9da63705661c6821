// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed OPC XML-DA 1.01 messages.
//!
//! Every request type implements [`XmlDaRequest`], which fixes at compile
//! time the SOAP action it is sent with and the response type it decodes to.
//!
//! Serde names follow the XML-DA schema: `@Name` fields are XML attributes,
//! other fields are child elements, `Vec` fields are repeated elements.

mod common;
mod requests;
mod responses;
mod value;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::soap::SoapAction;

pub use common::{
    BrowseFilter, ItemIdentifier, ItemProperty, ItemValue, LimitBits, OpcError, OpcQuality,
    QualityBits, ReplyBase, RequestOptions, ServerState,
};
pub use requests::{
    Browse, GetProperties, GetStatus, Read, ReadRequestItem, ReadRequestItemList, Subscribe,
    SubscribeRequestItem, SubscribeRequestItemList, SubscriptionCancel, SubscriptionPolledRefresh,
    Write, WriteRequestItemList,
};
pub use responses::{
    BrowseElement, BrowseResponse, GetPropertiesResponse, GetStatusResponse, PropertyReplyList,
    ReadResponse, ReplyItemList, ServerStatus, SubscribeItemValue, SubscribePolledRefreshReplyItemList,
    SubscribeReplyItemList, SubscribeResponse, SubscriptionCancelResponse,
    SubscriptionPolledRefreshResponse, WriteResponse,
};
pub use value::{TypedValue, XmlValue};

// =============================================================================
// XmlDaRequest
// =============================================================================

/// A request message of one XML-DA operation.
pub trait XmlDaRequest: Serialize + Send + Sync {
    /// The response message of the operation.
    type Response: DeserializeOwned + Send;

    /// The SOAP action of the operation.
    const ACTION: SoapAction;

    /// Returns the client request handle carried by the request, if any.
    fn client_request_handle(&self) -> Option<&str>;
}

/// Parses an `xsd:dateTime` value.
///
/// Values without an offset are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
