// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::transport::SoapTransport;
use crate::error::{ConfigurationError, TransportError, XmlDaResult};
use crate::soap::{self, SoapAction};
use crate::types::XmlDaConfig;

/// Content type of SOAP 1.1 requests.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Name of the SOAP action header.
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// SOAP over HTTP POST.
///
/// Connect and request timeouts are fixed when the transport is created.
#[derive(Debug, Clone)]
pub struct HttpSoapTransport {
    /// HTTP client.
    client: reqwest::Client,

    /// Server URL.
    endpoint: String,

    /// Request timeout, for error reporting.
    request_timeout: Duration,
}

impl HttpSoapTransport {
    /// Creates a transport for the configured server.
    pub fn new(config: &XmlDaConfig) -> XmlDaResult<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout);

        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|source| ConfigurationError::HttpClient { source })?;

        Ok(Self {
            client,
            endpoint: config.server_url.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn call(&self, action: SoapAction, envelope: String) -> XmlDaResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header(SOAP_ACTION_HEADER, action.header_value())
            .body(envelope)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&self.endpoint, self.request_timeout, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&self.endpoint, self.request_timeout, e))?;

        if status.is_success() {
            return Ok(body);
        }

        // SOAP 1.1 reports faults with HTTP 500.
        match soap::parse_fault(&body) {
            Some(fault) => Err(fault.into()),
            None => Err(TransportError::http_status(&self.endpoint, status.as_u16(), body).into()),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn display_name(&self) -> String {
        format!("HTTP SOAP transport ({})", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_config() {
        let config = XmlDaConfig::builder()
            .server_url("http://localhost:8080/xmlda")
            .extended_timeouts()
            .user_agent("xmlda-test")
            .build()
            .unwrap();

        let transport = HttpSoapTransport::new(&config).unwrap();

        assert_eq!(transport.endpoint(), "http://localhost:8080/xmlda");
        assert_eq!(transport.request_timeout(), Duration::from_millis(9_000));
        assert!(transport.display_name().contains("localhost:8080"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = XmlDaConfig::builder()
            .server_url("http://127.0.0.1:9/xmlda")
            .connect_timeout(Duration::from_millis(500))
            .request_timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        let transport = HttpSoapTransport::new(&config).unwrap();

        let err = transport
            .call(SoapAction::GetStatus, String::new())
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }
}
