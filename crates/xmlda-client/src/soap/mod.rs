// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SOAP 1.1 binding of the XML-DA operations.
//!
//! - [`action`]: the fixed table of SOAP action URIs
//! - [`envelope`]: envelope encoding, body extraction and fault parsing

pub mod action;
pub mod envelope;

pub use action::{SoapAction, XMLDA_NAMESPACE};
pub use envelope::{
    decode_body, decode_envelope, encode_element, encode_envelope, fault_envelope, parse_fault,
    wrap_body,
};
