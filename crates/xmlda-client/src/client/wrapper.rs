// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::http_transport::HttpSoapTransport;
use super::normalizer::{Normalize, RequestNormalizer};
use super::stats::ClientStats;
use super::transport::SoapTransport;
use crate::error::XmlDaResult;
use crate::messages::{
    Browse, BrowseResponse, GetProperties, GetPropertiesResponse, GetStatus, GetStatusResponse,
    Read, ReadResponse, Subscribe, SubscribeResponse, SubscriptionCancel,
    SubscriptionCancelResponse, SubscriptionPolledRefresh, SubscriptionPolledRefreshResponse,
    Write, WriteResponse, XmlDaRequest,
};
use crate::soap;
use crate::types::{TimeoutProfile, XmlDaConfig, XmlDaConfigBuilder};

// =============================================================================
// XmlDaClient
// =============================================================================

/// OPC XML-DA client.
///
/// Every operation normalizes its request (default locale, generated client
/// request handle, forced return flags), sends it as a SOAP envelope with the
/// operation's action, and decodes the typed response. Failures are returned
/// as they occur; nothing is retried.
///
/// A client is `Send + Sync` and may be shared between tasks. Generated
/// handles never repeat within one client.
///
/// # Examples
///
/// ```rust,ignore
/// use xmlda_client::{Read, XmlDaClient};
///
/// let client = XmlDaClient::builder()
///     .server_url("http://localhost/XMLDA/opcxmldaserver.asmx")
///     .build()?;
///
/// let status = client.get_status().await?;
/// println!("Server state: {:?}", status.server_state());
///
/// let reply = client.read(Read::items(["Static/Float"])).await?;
/// for item in reply.items() {
///     println!("{:?} = {:?}", item.item_name, item.value);
/// }
/// ```
pub struct XmlDaClient<T: SoapTransport = HttpSoapTransport> {
    /// Configuration.
    config: XmlDaConfig,

    /// Transport layer.
    transport: T,

    /// Locale and handle defaults.
    normalizer: RequestNormalizer,

    /// Client statistics.
    stats: ClientStats,
}

impl XmlDaClient<HttpSoapTransport> {
    /// Creates a client talking HTTP to the configured server.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is invalid.
    pub fn new(config: XmlDaConfig) -> XmlDaResult<Self> {
        config.validate()?;
        let transport = HttpSoapTransport::new(&config)?;
        Ok(Self::assemble(config, transport))
    }

    /// Creates a client builder.
    pub fn builder() -> XmlDaClientBuilder {
        XmlDaClientBuilder::default()
    }
}

impl<T: SoapTransport> XmlDaClient<T> {
    /// Creates a client over an explicit transport.
    ///
    /// The server URL of `config` is not required; the transport's endpoint
    /// is used when it is empty.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if timeouts or locale are invalid.
    pub fn with_transport(mut config: XmlDaConfig, transport: T) -> XmlDaResult<Self> {
        config.validate_settings()?;
        if config.server_url.is_empty() {
            config.server_url = transport.endpoint().to_string();
        }
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: XmlDaConfig, transport: T) -> Self {
        info!(
            server_url = %config.server_url,
            transport = %transport.display_name(),
            default_locale = %config.default_locale,
            connect_timeout_ms = config.connect_timeout.as_millis() as u64,
            request_timeout_ms = config.request_timeout.as_millis() as u64,
            "OPC XML-DA client created"
        );

        let normalizer = RequestNormalizer::new(config.default_locale.clone(), config.handle_seed);

        Self {
            config,
            transport,
            normalizer,
            stats: ClientStats::new(),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &XmlDaConfig {
        &self.config
    }

    /// Returns the server URL.
    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Returns the default locale.
    pub fn default_locale(&self) -> &str {
        self.normalizer.default_locale()
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the client statistics.
    pub fn stats(&self) -> &ClientStats {
        &self.stats
    }

    /// Resets the client statistics.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Returns a fresh client request handle.
    ///
    /// Also useful as a unique client item handle.
    pub fn generate_client_request_handle(&self) -> String {
        self.normalizer.generate_handle()
    }

    /// Normalizes a request in place, as every operation does before sending.
    pub fn normalize<R: Normalize>(&self, request: &mut R) {
        request.normalize(&self.normalizer);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Queries server status with a default request.
    pub async fn get_status(&self) -> XmlDaResult<GetStatusResponse> {
        self.get_status_with(GetStatus::default()).await
    }

    /// Queries server status with status text in the given locale.
    ///
    /// An empty locale falls back to the default locale.
    pub async fn get_status_in(&self, locale: impl Into<String>) -> XmlDaResult<GetStatusResponse> {
        self.get_status_with(GetStatus::in_locale(locale)).await
    }

    /// Queries server status.
    pub async fn get_status_with(&self, request: GetStatus) -> XmlDaResult<GetStatusResponse> {
        self.invoke(request).await
    }

    /// Queries server status with a default request adjusted by `customize`.
    pub async fn get_status_customized<F>(&self, customize: F) -> XmlDaResult<GetStatusResponse>
    where
        F: FnOnce(&mut GetStatus),
    {
        let mut request = GetStatus::default();
        customize(&mut request);
        self.get_status_with(request).await
    }

    /// Browses the root of the address space, all element kinds.
    pub async fn browse(&self) -> XmlDaResult<BrowseResponse> {
        self.browse_with(Browse::default()).await
    }

    /// Browses the address space.
    pub async fn browse_with(&self, request: Browse) -> XmlDaResult<BrowseResponse> {
        self.invoke(request).await
    }

    /// Browses with a default request adjusted by `customize`.
    pub async fn browse_customized<F>(&self, customize: F) -> XmlDaResult<BrowseResponse>
    where
        F: FnOnce(&mut Browse),
    {
        let mut request = Browse::default();
        customize(&mut request);
        self.browse_with(request).await
    }

    /// Reads item properties.
    pub async fn get_properties(&self, request: GetProperties) -> XmlDaResult<GetPropertiesResponse> {
        self.invoke(request).await
    }

    /// Reads item values.
    pub async fn read(&self, request: Read) -> XmlDaResult<ReadResponse> {
        self.invoke(request).await
    }

    /// Writes item values.
    pub async fn write(&self, request: Write) -> XmlDaResult<WriteResponse> {
        self.invoke(request).await
    }

    /// Creates a subscription.
    pub async fn subscribe(&self, request: Subscribe) -> XmlDaResult<SubscribeResponse> {
        self.invoke(request).await
    }

    /// Polls subscriptions for changed values.
    pub async fn subscription_polled_refresh(
        &self,
        request: SubscriptionPolledRefresh,
    ) -> XmlDaResult<SubscriptionPolledRefreshResponse> {
        self.invoke(request).await
    }

    /// Cancels a subscription.
    pub async fn subscription_cancel(
        &self,
        request: SubscriptionCancel,
    ) -> XmlDaResult<SubscriptionCancelResponse> {
        self.invoke(request).await
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Normalizes and sends any request, returning its typed response.
    pub async fn invoke<R>(&self, mut request: R) -> XmlDaResult<R::Response>
    where
        R: XmlDaRequest + Normalize,
    {
        request.normalize(&self.normalizer);
        self.dispatch(request).await
    }

    /// Sends a request as is.
    pub async fn dispatch<R: XmlDaRequest>(&self, request: R) -> XmlDaResult<R::Response> {
        let action = R::ACTION;
        let handle = request.client_request_handle().unwrap_or_default().to_string();
        let started = Instant::now();

        let result = self.exchange(&request).await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => self.stats.record_call(action, elapsed),
            Err(_) => self.stats.record_failure(),
        }

        debug!(
            action = %action,
            client_request_handle = %handle,
            elapsed_ms = elapsed.as_millis() as u64,
            ok = result.is_ok(),
            "XML-DA call completed"
        );

        result
    }

    async fn exchange<R: XmlDaRequest>(&self, request: &R) -> XmlDaResult<R::Response> {
        let action = R::ACTION;
        let envelope = soap::encode_envelope(action, request)?;
        trace!(action = %action, envelope = %envelope, "Sending SOAP request");

        let reply = self.transport.call(action, envelope).await?;
        trace!(action = %action, reply = %reply, "Received SOAP reply");

        soap::decode_envelope(action, &reply)
    }
}

impl<T: SoapTransport> fmt::Debug for XmlDaClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDaClient")
            .field("server_url", &self.config.server_url)
            .field("transport", &self.transport.display_name())
            .field("default_locale", &self.config.default_locale)
            .finish()
    }
}

// =============================================================================
// XmlDaClientBuilder
// =============================================================================

/// Builder for [`XmlDaClient`].
///
/// [`build`](Self::build) requires a server URL; with
/// [`build_with_transport`](Self::build_with_transport) it is optional.
#[derive(Debug, Default)]
pub struct XmlDaClientBuilder {
    config: XmlDaConfigBuilder,
}

impl XmlDaClientBuilder {
    /// Starts from an existing configuration.
    pub fn config(mut self, config: XmlDaConfig) -> Self {
        self.config = XmlDaConfigBuilder::from(config);
        self
    }

    /// Sets the server URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.server_url(url);
        self
    }

    /// Sets the default locale.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.config = self.config.default_locale(locale);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Sets the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.request_timeout(timeout);
        self
    }

    /// Sets both timeouts from a preset profile.
    pub fn timeout_profile(mut self, profile: TimeoutProfile) -> Self {
        self.config = self.config.timeout_profile(profile);
        self
    }

    /// Uses the extended timeout profile.
    pub fn extended_timeouts(self) -> Self {
        self.timeout_profile(TimeoutProfile::Extended)
    }

    /// Sets the first generated request handle.
    pub fn handle_seed(mut self, seed: u64) -> Self {
        self.config = self.config.handle_seed(seed);
        self
    }

    /// Sets the HTTP user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(agent);
        self
    }

    /// Builds an HTTP client.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when no server URL was given or the
    /// configuration is invalid.
    pub fn build(self) -> XmlDaResult<XmlDaClient> {
        XmlDaClient::new(self.config.build()?)
    }

    /// Builds a client over an explicit transport.
    pub fn build_with_transport<T: SoapTransport>(self, transport: T) -> XmlDaResult<XmlDaClient<T>> {
        XmlDaClient::with_transport(self.config.build_unchecked(), transport)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{TransportError, XmlDaError};
    use crate::messages::{RequestOptions, ServerState};
    use crate::soap::SoapAction;

    /// Answers every call with a canned body and records the envelopes.
    struct CannedTransport {
        reply: String,
        sent: Mutex<Vec<(SoapAction, String)>>,
    }

    impl CannedTransport {
        fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(SoapAction, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SoapTransport for CannedTransport {
        async fn call(&self, action: SoapAction, envelope: String) -> XmlDaResult<String> {
            self.sent.lock().unwrap().push((action, envelope));
            if self.reply.is_empty() {
                return Err(TransportError::other("canned", "connection reset").into());
            }
            Ok(self.reply.clone())
        }

        fn endpoint(&self) -> &str {
            "canned"
        }
    }

    fn status_reply() -> String {
        soap::wrap_body(
            r#"<GetStatusResponse><GetStatusResult ServerState="running"/></GetStatusResponse>"#,
        )
    }

    fn read_reply() -> String {
        soap::wrap_body(r#"<ReadResponse><ReadResult ServerState="running"/></ReadResponse>"#)
    }

    fn client(reply: String) -> XmlDaClient<CannedTransport> {
        XmlDaClient::builder()
            .build_with_transport(CannedTransport::new(reply))
            .unwrap()
    }

    #[test]
    fn test_build_without_server_url_fails() {
        let err = XmlDaClient::builder().build().unwrap_err();
        assert!(matches!(err, XmlDaError::Configuration(_)));
    }

    #[test]
    fn test_build_with_transport_needs_no_url() {
        let client = client(status_reply());
        assert_eq!(client.server_url(), "canned");
        assert_eq!(client.default_locale(), "en-US");
    }

    #[test]
    fn test_build_http_client() {
        let client = XmlDaClient::builder()
            .server_url("http://localhost/xmlda")
            .default_locale("de-DE")
            .build()
            .unwrap();
        assert_eq!(client.default_locale(), "de-DE");
        assert_eq!(client.transport().endpoint(), "http://localhost/xmlda");
    }

    #[tokio::test]
    async fn test_get_status_sends_defaults() {
        let client = client(status_reply());

        let response = client.get_status().await.unwrap();

        assert_eq!(response.server_state(), Some(ServerState::Running));
        let sent = client.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, SoapAction::GetStatus);
        assert!(sent[0].1.contains("LocaleID=\"en-US\""));
        assert!(sent[0].1.contains("ClientRequestHandle=\"0\""));
        assert_eq!(client.stats().calls(SoapAction::GetStatus), 1);
    }

    #[tokio::test]
    async fn test_read_forces_return_flags() {
        let client = client(read_reply());
        let request = Read {
            options: Some(RequestOptions {
                return_item_time: false,
                ..Default::default()
            }),
            ..Read::items(["Static/Int4"])
        };

        client.read(request).await.unwrap();

        let envelope = &client.transport().sent()[0].1;
        assert!(envelope.contains("ReturnItemTime=\"true\""));
        assert!(envelope.contains("ReturnErrorText=\"true\""));
        assert!(envelope.contains("ReturnDiagnosticInfo=\"true\""));
        assert!(envelope.contains("ReturnItemName=\"true\""));
        assert!(envelope.contains("ReturnItemPath=\"false\""));
    }

    #[tokio::test]
    async fn test_customized_request() {
        let client = client(status_reply());

        client
            .get_status_customized(|r| r.client_request_handle = Some("custom".into()))
            .await
            .unwrap();

        let envelope = &client.transport().sent()[0].1;
        assert!(envelope.contains("ClientRequestHandle=\"custom\""));
    }

    #[tokio::test]
    async fn test_mismatched_reply_is_decoding_error() {
        let client = client(status_reply());

        let err = client.read(Read::items(["x"])).await.unwrap_err();

        assert!(err.is_decoding());
        assert_eq!(client.stats().failures(), 1);
        assert_eq!(client.stats().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = client(String::new());

        let err = client.get_status().await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(client.transport().sent().len(), 1);
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<XmlDaClient>();
        assert_send_sync::<XmlDaClient<CannedTransport>>();
    }
}
