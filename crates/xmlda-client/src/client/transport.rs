// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SOAP transport abstraction.
//!
//! A transport moves one serialized envelope to the server and returns the
//! reply body. It knows nothing about XML-DA messages, which lets tests swap
//! the HTTP implementation for a recording mock.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::XmlDaResult;
use crate::soap::SoapAction;

/// Exchanges SOAP envelopes with an XML-DA server.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Sends `envelope` with the given action and returns the reply body.
    ///
    /// A reply carrying a SOAP Fault may be returned either as the body (the
    /// codec turns it into a fault error) or directly as
    /// [`XmlDaError::Fault`](crate::error::XmlDaError::Fault).
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails.
    async fn call(&self, action: SoapAction, envelope: String) -> XmlDaResult<String>;

    /// Returns the endpoint this transport talks to.
    fn endpoint(&self) -> &str;

    /// Returns a display name for logging.
    fn display_name(&self) -> String {
        format!("SOAP transport ({})", self.endpoint())
    }
}

#[async_trait]
impl<T: SoapTransport + ?Sized> SoapTransport for Arc<T> {
    async fn call(&self, action: SoapAction, envelope: String) -> XmlDaResult<String> {
        (**self).call(action, envelope).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

#[async_trait]
impl<T: SoapTransport + ?Sized> SoapTransport for Box<T> {
    async fn call(&self, action: SoapAction, envelope: String) -> XmlDaResult<String> {
        (**self).call(action, envelope).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}
