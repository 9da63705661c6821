// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SOAP 1.1 envelope encoding and decoding.
//!
//! Message bodies go through `quick-xml`'s serde support. The envelope
//! itself is located with the pull reader: the first child of `Body` is cut
//! out of the reply and handed to the deserializer, or parsed as a `Fault`.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::action::{SoapAction, XMLDA_NAMESPACE};
use crate::error::{DecodingError, EncodingError, SoapFault, XmlDaResult};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML Schema namespace.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

// =============================================================================
// Encoding
// =============================================================================

/// Serializes a request into a complete SOAP envelope.
pub fn encode_envelope<T: Serialize>(action: SoapAction, body: &T) -> XmlDaResult<String> {
    let element = encode_element(action.operation_name(), body)?;
    Ok(wrap_body(&element))
}

/// Serializes a message as a body element in the XML-DA namespace.
pub fn encode_element<T: Serialize>(root: &str, body: &T) -> XmlDaResult<String> {
    let xml = quick_xml::se::to_string_with_root(root, body)
        .map_err(|e| EncodingError::serialize(root, e.to_string()))?;

    let open = format!("<{root}");
    match xml.strip_prefix(&open) {
        Some(rest) => Ok(format!("{open} xmlns=\"{XMLDA_NAMESPACE}\"{rest}")),
        None => Err(
            EncodingError::serialize(root, "serializer produced a different root element").into(),
        ),
    }
}

/// Wraps a body element in a SOAP envelope.
pub fn wrap_body(element: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"{SOAP_ENVELOPE_NAMESPACE}\" \
         xmlns:xsi=\"{XSI_NAMESPACE}\" xmlns:xsd=\"{XSD_NAMESPACE}\">\
         <soap:Body>{element}</soap:Body></soap:Envelope>"
    )
}

/// Builds a SOAP envelope carrying a fault.
pub fn fault_envelope(fault: &SoapFault) -> String {
    let mut element = format!(
        "<soap:Fault><faultcode>{}</faultcode><faultstring>{}</faultstring>",
        escape(fault.code.as_str()),
        escape(fault.reason.as_str())
    );
    if let Some(actor) = &fault.actor {
        element.push_str(&format!("<faultactor>{}</faultactor>", escape(actor.as_str())));
    }
    if let Some(detail) = &fault.detail {
        element.push_str(&format!("<detail>{}</detail>", escape(detail.as_str())));
    }
    element.push_str("</soap:Fault>");
    wrap_body(&element)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes the response of `action` from a reply envelope.
///
/// A `Fault` body becomes [`XmlDaError::Fault`](crate::error::XmlDaError::Fault).
pub fn decode_envelope<T: DeserializeOwned>(action: SoapAction, xml: &str) -> XmlDaResult<T> {
    decode_body(action.response_element(), xml)
}

/// Decodes the body element of an envelope, which must be named `expected`.
///
/// Leading and trailing whitespace of text content is not preserved.
pub fn decode_body<T: DeserializeOwned>(expected: &str, xml: &str) -> XmlDaResult<T> {
    match body_element(xml)? {
        BodyElement::Fault(fault) => Err(fault.into()),
        BodyElement::Message { name, fragment } => {
            if name != expected {
                return Err(DecodingError::unexpected_element(expected, name).into());
            }
            quick_xml::de::from_str(fragment).map_err(|source| {
                DecodingError::Deserialize {
                    element: name,
                    source,
                }
                .into()
            })
        }
    }
}

/// Returns the fault carried by an envelope, if it carries one.
pub fn parse_fault(xml: &str) -> Option<SoapFault> {
    match body_element(xml) {
        Ok(BodyElement::Fault(fault)) => Some(fault),
        _ => None,
    }
}

/// Returns the local name of the body element of an envelope.
pub fn body_element_name(xml: &str) -> XmlDaResult<String> {
    match body_element(xml)? {
        BodyElement::Fault(_) => Ok("Fault".to_string()),
        BodyElement::Message { name, .. } => Ok(name),
    }
}

enum BodyElement<'a> {
    Fault(SoapFault),
    Message { name: String, fragment: &'a str },
}

fn body_element(xml: &str) -> XmlDaResult<BodyElement<'_>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_envelope = false;
    let mut in_body = false;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(malformed)?;

        match event {
            Event::Start(e) if in_body => {
                let name = local_name(e.local_name().as_ref());
                let qname = e.name().as_ref().to_vec();
                reader.read_to_end(QName(&qname)).map_err(malformed)?;
                let end = reader.buffer_position() as usize;
                return Ok(classify(name, xml[start..end].trim()));
            }
            Event::Empty(e) if in_body => {
                let name = local_name(e.local_name().as_ref());
                let end = reader.buffer_position() as usize;
                return Ok(classify(name, xml[start..end].trim()));
            }
            Event::End(_) if in_body => return Err(DecodingError::MissingBody.into()),
            Event::Start(e) => match e.local_name().as_ref() {
                b"Envelope" => saw_envelope = true,
                b"Body" if saw_envelope => in_body = true,
                _ if saw_envelope => {
                    let qname = e.name().as_ref().to_vec();
                    reader.read_to_end(QName(&qname)).map_err(malformed)?;
                }
                other => {
                    return Err(DecodingError::malformed(format!(
                        "expected SOAP Envelope, found '{}'",
                        local_name(other)
                    ))
                    .into())
                }
            },
            Event::Empty(e) if saw_envelope && e.local_name().as_ref() == b"Body" => {
                return Err(DecodingError::MissingBody.into());
            }
            Event::Eof if saw_envelope => return Err(DecodingError::MissingBody.into()),
            Event::Eof => return Err(DecodingError::malformed("no SOAP Envelope").into()),
            _ => {}
        }
    }
}

fn classify(name: String, fragment: &str) -> BodyElement<'_> {
    if name == "Fault" {
        BodyElement::Fault(read_fault(fragment))
    } else {
        BodyElement::Message { name, fragment }
    }
}

#[derive(Clone, Copy)]
enum FaultField {
    Code,
    Reason,
    Actor,
    Detail,
}

fn read_fault(fragment: &str) -> SoapFault {
    let mut reader = Reader::from_str(fragment);
    reader.config_mut().trim_text(true);

    let mut fault = SoapFault::new("", "");
    let mut detail = Vec::new();
    let mut current = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"faultcode" => current = Some(FaultField::Code),
                b"faultstring" => current = Some(FaultField::Reason),
                b"faultactor" => current = Some(FaultField::Actor),
                b"detail" => current = Some(FaultField::Detail),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                match current {
                    Some(FaultField::Code) => fault.code.push_str(&text),
                    Some(FaultField::Reason) => fault.reason.push_str(&text),
                    Some(FaultField::Actor) => fault.actor.get_or_insert_with(String::new).push_str(&text),
                    Some(FaultField::Detail) => detail.push(text),
                    None => {}
                }
            }
            Ok(Event::End(e)) => match (current, e.local_name().as_ref()) {
                (Some(FaultField::Detail), b"detail") => current = None,
                (Some(FaultField::Detail), _) => {}
                _ => current = None,
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    if !detail.is_empty() {
        fault.detail = Some(detail.join(" "));
    }
    fault
}

fn local_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn malformed(error: quick_xml::Error) -> DecodingError {
    DecodingError::malformed(error.to_string())
}
