// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SOAP action identifiers of the XML-DA operations.

use std::fmt;
use std::str::FromStr;

/// Namespace of XML-DA messages; also the prefix of every SOAP action.
pub const XMLDA_NAMESPACE: &str = "http://opcfoundation.org/webservices/XMLDA/1.0/";

/// The eight XML-DA operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapAction {
    /// GetStatus.
    GetStatus,
    /// Browse.
    Browse,
    /// GetProperties.
    GetProperties,
    /// Read.
    Read,
    /// Write.
    Write,
    /// Subscribe.
    Subscribe,
    /// SubscriptionPolledRefresh.
    SubscriptionPolledRefresh,
    /// SubscriptionCancel.
    SubscriptionCancel,
}

impl SoapAction {
    /// All actions, in declaration order.
    pub const ALL: [SoapAction; 8] = [
        Self::GetStatus,
        Self::Browse,
        Self::GetProperties,
        Self::Read,
        Self::Write,
        Self::Subscribe,
        Self::SubscriptionPolledRefresh,
        Self::SubscriptionCancel,
    ];

    /// Returns the operation name, which is also the request root element.
    pub const fn operation_name(&self) -> &'static str {
        match self {
            Self::GetStatus => "GetStatus",
            Self::Browse => "Browse",
            Self::GetProperties => "GetProperties",
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Subscribe => "Subscribe",
            Self::SubscriptionPolledRefresh => "SubscriptionPolledRefresh",
            Self::SubscriptionCancel => "SubscriptionCancel",
        }
    }

    /// Returns the action URI.
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::GetStatus => "http://opcfoundation.org/webservices/XMLDA/1.0/GetStatus",
            Self::Browse => "http://opcfoundation.org/webservices/XMLDA/1.0/Browse",
            Self::GetProperties => "http://opcfoundation.org/webservices/XMLDA/1.0/GetProperties",
            Self::Read => "http://opcfoundation.org/webservices/XMLDA/1.0/Read",
            Self::Write => "http://opcfoundation.org/webservices/XMLDA/1.0/Write",
            Self::Subscribe => "http://opcfoundation.org/webservices/XMLDA/1.0/Subscribe",
            Self::SubscriptionPolledRefresh => {
                "http://opcfoundation.org/webservices/XMLDA/1.0/SubscriptionPolledRefresh"
            }
            Self::SubscriptionCancel => {
                "http://opcfoundation.org/webservices/XMLDA/1.0/SubscriptionCancel"
            }
        }
    }

    /// Returns the `SOAPAction` header value (the quoted URI).
    pub fn header_value(&self) -> String {
        format!("\"{}\"", self.uri())
    }

    /// Returns the response root element name.
    pub const fn response_element(&self) -> &'static str {
        match self {
            Self::GetStatus => "GetStatusResponse",
            Self::Browse => "BrowseResponse",
            Self::GetProperties => "GetPropertiesResponse",
            Self::Read => "ReadResponse",
            Self::Write => "WriteResponse",
            Self::Subscribe => "SubscribeResponse",
            Self::SubscriptionPolledRefresh => "SubscriptionPolledRefreshResponse",
            Self::SubscriptionCancel => "SubscriptionCancelResponse",
        }
    }

    /// Returns the position of this action in [`SoapAction::ALL`].
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Looks up an action by URI; surrounding quotes are ignored.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let uri = uri.trim().trim_matches('"');
        Self::ALL.into_iter().find(|a| a.uri() == uri)
    }
}

impl fmt::Display for SoapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation_name())
    }
}

impl FromStr for SoapAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.operation_name().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_uri(s))
            .ok_or_else(|| format!("Unknown XML-DA operation: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_is_namespace_plus_operation() {
        for action in SoapAction::ALL {
            assert_eq!(
                action.uri(),
                format!("{}{}", XMLDA_NAMESPACE, action.operation_name())
            );
            assert_eq!(
                action.response_element(),
                format!("{}Response", action.operation_name())
            );
        }
    }

    #[test]
    fn test_header_value_is_quoted() {
        assert_eq!(
            SoapAction::Read.header_value(),
            "\"http://opcfoundation.org/webservices/XMLDA/1.0/Read\""
        );
    }

    #[test]
    fn test_index_matches_all() {
        for (i, action) in SoapAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            SoapAction::from_uri("\"http://opcfoundation.org/webservices/XMLDA/1.0/Browse\""),
            Some(SoapAction::Browse)
        );
        assert_eq!("subscribe".parse::<SoapAction>(), Ok(SoapAction::Subscribe));
        assert!("Publish".parse::<SoapAction>().is_err());
    }
}
