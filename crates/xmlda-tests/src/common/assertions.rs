// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Assertion helpers for request envelopes and client errors.

use std::collections::HashSet;

use xmlda_client::soap::envelope::body_element_name;
use xmlda_client::{XmlDaError, XMLDA_NAMESPACE};

/// Returns the value of the first `name="..."` attribute in `xml`.
pub fn attribute_value(xml: &str, name: &str) -> Option<String> {
    let needle = format!(" {name}=\"");
    let start = xml.find(&needle)? + needle.len();
    let end = xml[start..].find('"')?;
    Some(xml[start..start + end].to_string())
}

// =============================================================================
// Envelope Assertions
// =============================================================================

/// Assertion extensions for serialized request envelopes.
pub trait EnvelopeAssertions {
    /// Assert that the body element has the given local name and the XML-DA namespace.
    fn assert_body_element(&self, expected: &str);

    /// Assert that an attribute is present with the given value.
    fn assert_attribute(&self, name: &str, expected: &str);

    /// Assert that an attribute is absent.
    fn assert_no_attribute(&self, name: &str);

    /// Returns the client request handle, failing if there is none.
    fn client_request_handle(&self) -> String;
}

impl EnvelopeAssertions for str {
    fn assert_body_element(&self, expected: &str) {
        let actual = body_element_name(self).expect("Envelope has no readable body");
        assert_eq!(actual, expected, "Unexpected body element in {}", self);
        assert!(
            self.contains(&format!("<{expected} xmlns=\"{XMLDA_NAMESPACE}\"")),
            "Body element {} is not in the XML-DA namespace: {}",
            expected,
            self
        );
    }

    fn assert_attribute(&self, name: &str, expected: &str) {
        let actual = attribute_value(self, name);
        assert_eq!(
            actual.as_deref(),
            Some(expected),
            "Expected {}=\"{}\" in {}",
            name,
            expected,
            self
        );
    }

    fn assert_no_attribute(&self, name: &str) {
        assert!(
            attribute_value(self, name).is_none(),
            "Expected no {} attribute in {}",
            name,
            self
        );
    }

    fn client_request_handle(&self) -> String {
        attribute_value(self, "ClientRequestHandle")
            .unwrap_or_else(|| panic!("No ClientRequestHandle in {}", self))
    }
}

impl EnvelopeAssertions for String {
    fn assert_body_element(&self, expected: &str) {
        self.as_str().assert_body_element(expected)
    }

    fn assert_attribute(&self, name: &str, expected: &str) {
        self.as_str().assert_attribute(name, expected)
    }

    fn assert_no_attribute(&self, name: &str) {
        self.as_str().assert_no_attribute(name)
    }

    fn client_request_handle(&self) -> String {
        self.as_str().client_request_handle()
    }
}

/// Asserts that the envelopes carry pairwise distinct client request handles.
pub fn assert_distinct_handles<S: AsRef<str>>(envelopes: &[S]) {
    let handles: HashSet<String> = envelopes
        .iter()
        .map(|e| e.as_ref().client_request_handle())
        .collect();
    assert_eq!(
        handles.len(),
        envelopes.len(),
        "Client request handles repeat across {} envelopes",
        envelopes.len()
    );
}

// =============================================================================
// Error Assertions
// =============================================================================

/// Assertion extensions for client errors.
pub trait ErrorAssertions {
    /// Assert a SOAP fault with the given unprefixed fault code.
    fn assert_fault(&self, code: &str);

    /// Assert a transport error.
    fn assert_transport(&self);

    /// Assert a decoding error.
    fn assert_decoding(&self);
}

impl ErrorAssertions for XmlDaError {
    fn assert_fault(&self, code: &str) {
        match self {
            XmlDaError::Fault(fault) => assert_eq!(
                fault.code_local_part(),
                code,
                "Unexpected fault code in {:?}",
                fault
            ),
            other => panic!("Expected SOAP fault {}, got {:?}", code, other),
        }
    }

    fn assert_transport(&self) {
        assert!(self.is_transport(), "Expected transport error, got {:?}", self);
    }

    fn assert_decoding(&self) {
        assert!(self.is_decoding(), "Expected decoding error, got {:?}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_value() {
        let xml = r#"<Read ReturnItemTime="true" ClientRequestHandle="17"><Items ItemName="a"/></Read>"#;
        assert_eq!(attribute_value(xml, "ClientRequestHandle").as_deref(), Some("17"));
        assert_eq!(attribute_value(xml, "ItemName").as_deref(), Some("a"));
        assert!(attribute_value(xml, "LocaleID").is_none());
    }

    #[test]
    #[should_panic(expected = "repeat")]
    fn test_distinct_handles_detects_repeat() {
        let envelopes = [
            r#"<GetStatus ClientRequestHandle="1"/>"#,
            r#"<GetStatus ClientRequestHandle="1"/>"#,
        ];
        assert_distinct_handles(&envelopes);
    }
}
