// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Reply envelopes as an XML-DA server would send them, and configuration
//! documents in every supported format.

use xmlda_client::soap::{fault_envelope, wrap_body, SoapAction, XMLDA_NAMESPACE};
use xmlda_client::SoapFault;

/// Fixed reply timestamp.
pub const REPLY_TIME: &str = "2024-05-06T07:08:09.123Z";

/// Subscription handle returned by [`ReplyFixtures::subscribe`].
pub const SERVER_SUB_HANDLE: &str = "sub-1";

// =============================================================================
// Reply Fixtures
// =============================================================================

/// Canned reply envelopes.
pub struct ReplyFixtures;

impl ReplyFixtures {
    /// Returns the default reply for `action`.
    pub fn for_action(action: SoapAction) -> String {
        match action {
            SoapAction::GetStatus => Self::get_status(),
            SoapAction::Browse => Self::browse(),
            SoapAction::GetProperties => Self::get_properties(),
            SoapAction::Read => Self::read(&[("Static/Float", "xsd:float", "1.5")]),
            SoapAction::Write => Self::write(&["Dynamic/Double"]),
            SoapAction::Subscribe => Self::subscribe(SERVER_SUB_HANDLE),
            SoapAction::SubscriptionPolledRefresh => Self::polled_refresh(&[("Static/Int4", "42")]),
            SoapAction::SubscriptionCancel => Self::subscription_cancel(),
        }
    }

    /// `GetStatusResponse` of a running server.
    pub fn get_status() -> String {
        body(format!(
            "<GetStatusResponse xmlns=\"{XMLDA_NAMESPACE}\">\
             <GetStatusResult RcvTime=\"{REPLY_TIME}\" ReplyTime=\"{REPLY_TIME}\" \
             ServerState=\"running\"/>\
             <Status StartTime=\"2024-05-01T00:00:00Z\" ProductVersion=\"1.0.0\">\
             <StatusInfo>Fixture server</StatusInfo>\
             <VendorInfo>xmlda-tests</VendorInfo>\
             <SupportedLocaleIDs>en-US</SupportedLocaleIDs>\
             <SupportedLocaleIDs>de-DE</SupportedLocaleIDs>\
             <SupportedInterfaceVersions>XML_DA_Version_1_0</SupportedInterfaceVersions>\
             </Status></GetStatusResponse>"
        ))
    }

    /// `BrowseResponse` with one branch and one item.
    pub fn browse() -> String {
        body(format!(
            "<BrowseResponse xmlns=\"{XMLDA_NAMESPACE}\" MoreElements=\"false\">\
             <BrowseResult ReplyTime=\"{REPLY_TIME}\" ServerState=\"running\"/>\
             <Elements Name=\"Static\" ItemName=\"Static\" IsItem=\"false\" HasChildren=\"true\"/>\
             <Elements Name=\"Float\" ItemName=\"Static/Float\" IsItem=\"true\" HasChildren=\"false\"/>\
             </BrowseResponse>"
        ))
    }

    /// `GetPropertiesResponse` for `Static/Float`.
    pub fn get_properties() -> String {
        body(format!(
            "<GetPropertiesResponse xmlns=\"{XMLDA_NAMESPACE}\">\
             <GetPropertiesResult ServerState=\"running\"/>\
             <PropertyLists ItemName=\"Static/Float\">\
             <Properties Name=\"dataType\"><Value xsi:type=\"xsd:QName\">float</Value></Properties>\
             <Properties Name=\"accessRights\"><Value xsi:type=\"xsd:string\">readWritable</Value></Properties>\
             </PropertyLists></GetPropertiesResponse>"
        ))
    }

    /// `ReadResponse` with good values for `(item name, xsi type, text)`.
    pub fn read(items: &[(&str, &str, &str)]) -> String {
        let items: String = items
            .iter()
            .map(|(name, xsi_type, text)| {
                format!(
                    "<Items ItemName=\"{name}\" Timestamp=\"{REPLY_TIME}\">\
                     <Value xsi:type=\"{xsi_type}\">{text}</Value>\
                     <Quality QualityField=\"good\"/></Items>"
                )
            })
            .collect();
        body(format!(
            "<ReadResponse xmlns=\"{XMLDA_NAMESPACE}\">\
             <ReadResult ReplyTime=\"{REPLY_TIME}\" ServerState=\"running\"/>\
             <RItemList>{items}</RItemList></ReadResponse>"
        ))
    }

    /// `ReadResponse` in which `item_name` is unknown to the server.
    pub fn read_unknown_item(item_name: &str) -> String {
        body(format!(
            "<ReadResponse xmlns=\"{XMLDA_NAMESPACE}\">\
             <ReadResult ServerState=\"running\"/>\
             <RItemList><Items ItemName=\"{item_name}\" ResultID=\"E_UNKNOWNITEMNAME\"/></RItemList>\
             <Errors ID=\"E_UNKNOWNITEMNAME\"><Text>The item name is no longer available</Text></Errors>\
             </ReadResponse>"
        ))
    }

    /// `WriteResponse` acknowledging the given items.
    pub fn write(item_names: &[&str]) -> String {
        let items: String = item_names
            .iter()
            .map(|name| format!("<Items ItemName=\"{name}\"/>"))
            .collect();
        body(format!(
            "<WriteResponse xmlns=\"{XMLDA_NAMESPACE}\">\
             <WriteResult ServerState=\"running\"/>\
             <RItemList>{items}</RItemList></WriteResponse>"
        ))
    }

    /// `SubscribeResponse` creating `handle`.
    pub fn subscribe(handle: &str) -> String {
        body(format!(
            "<SubscribeResponse xmlns=\"{XMLDA_NAMESPACE}\" ServerSubHandle=\"{handle}\">\
             <SubscribeResult ServerState=\"running\"/>\
             <RItemList RevisedSamplingRate=\"1000\"><Items/></RItemList>\
             </SubscribeResponse>"
        ))
    }

    /// `SubscriptionPolledRefreshResponse` with changed `(item name, int)` values.
    pub fn polled_refresh(items: &[(&str, &str)]) -> String {
        let items: String = items
            .iter()
            .map(|(name, text)| {
                format!(
                    "<Items ItemName=\"{name}\"><Value xsi:type=\"xsd:int\">{text}</Value></Items>"
                )
            })
            .collect();
        body(format!(
            "<SubscriptionPolledRefreshResponse xmlns=\"{XMLDA_NAMESPACE}\">\
             <SubscriptionPolledRefreshResult ServerState=\"running\"/>\
             <RItemList SubscriptionHandle=\"{SERVER_SUB_HANDLE}\">{items}</RItemList>\
             </SubscriptionPolledRefreshResponse>"
        ))
    }

    /// `SubscriptionCancelResponse`.
    pub fn subscription_cancel() -> String {
        body(format!(
            "<SubscriptionCancelResponse xmlns=\"{XMLDA_NAMESPACE}\"/>"
        ))
    }

    /// A `soap:Server` fault.
    pub fn server_fault(reason: &str) -> String {
        fault_envelope(&SoapFault::new("soap:Server", reason))
    }

    /// A `soap:Client` fault with detail text.
    pub fn client_fault(reason: &str, detail: &str) -> String {
        fault_envelope(&SoapFault::new("soap:Client", reason).with_detail(detail))
    }

    /// An envelope that is not well-formed.
    pub fn malformed() -> String {
        "<soap:Envelope><soap:Body><GetStatusResponse>".to_string()
    }
}

fn body(element: String) -> String {
    wrap_body(&element)
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Configuration documents.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// YAML document with extended timeouts.
    pub fn yaml(server_url: &str) -> String {
        format!(
            "server_url: {server_url}\n\
             default_locale: de-DE\n\
             connect_timeout: 11s\n\
             request_timeout: 9s\n\
             handle_seed: 500\n"
        )
    }

    /// TOML document with only the server URL.
    pub fn toml_minimal(server_url: &str) -> String {
        format!("server_url = \"{server_url}\"\n")
    }

    /// JSON document with a user agent.
    pub fn json(server_url: &str) -> String {
        format!(
            "{{\n  \"server_url\": \"{server_url}\",\n  \"request_timeout\": \"2s 500ms\",\n  \
             \"user_agent\": \"fixture-agent\"\n}}\n"
        )
    }
}
