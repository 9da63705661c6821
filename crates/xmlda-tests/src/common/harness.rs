// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! An in-process XML-DA server on a loopback port, for exercising the real
//! HTTP transport.
//!
//! The server answers `POST /xmlda` by looking up the `SOAPAction` header
//! and returning the canned reply for that action. Unknown actions get a
//! `soap:Client` fault with HTTP 500. Every request is recorded.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use xmlda_client::soap::{fault_envelope, SoapAction};
use xmlda_client::{SoapFault, XmlDaClient, XmlDaResult};

use super::fixtures::ReplyFixtures;

/// Path the fake server answers on.
pub const SOAP_PATH: &str = "/xmlda";

/// A request received by [`FakeXmlDaServer`].
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    /// Raw `SOAPAction` header.
    pub soap_action: Option<String>,
    /// Raw `Content-Type` header.
    pub content_type: Option<String>,
    /// Request body.
    pub body: String,
}

#[derive(Debug, Clone)]
struct CannedReply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Debug, Default)]
struct FakeServerState {
    replies: Mutex<HashMap<SoapAction, CannedReply>>,
    received: Mutex<Vec<ReceivedRequest>>,
}

// =============================================================================
// FakeXmlDaServer
// =============================================================================

/// A fake XML-DA server.
///
/// Shuts down when dropped.
pub struct FakeXmlDaServer {
    addr: SocketAddr,
    state: Arc<FakeServerState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl FakeXmlDaServer {
    /// Starts a server answering every action with its fixture reply.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(FakeServerState::default());
        {
            let mut replies = state.replies.lock().await;
            for action in SoapAction::ALL {
                replies.insert(
                    action,
                    CannedReply {
                        status: StatusCode::OK,
                        body: ReplyFixtures::for_action(action),
                        delay: Duration::ZERO,
                    },
                );
            }
        }

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = Router::new()
            .route(SOAP_PATH, post(handle_soap))
            .with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                debug!(error = %e, "Fake XML-DA server stopped with error");
            }
        });

        debug!(%addr, "Fake XML-DA server listening");

        Ok(Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            task,
        })
    }

    /// Returns the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the SOAP endpoint URL.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, SOAP_PATH)
    }

    /// Returns a URL on this server that has no route.
    pub fn missing_url(&self) -> String {
        format!("http://{}/not-here", self.addr)
    }

    /// Answers `action` with `body` and HTTP 200.
    pub async fn set_reply(&self, action: SoapAction, body: impl Into<String>) {
        self.set_reply_with_status(action, StatusCode::OK, body).await;
    }

    /// Answers `action` with `body` and the given status.
    pub async fn set_reply_with_status(
        &self,
        action: SoapAction,
        status: StatusCode,
        body: impl Into<String>,
    ) {
        self.state.replies.lock().await.insert(
            action,
            CannedReply {
                status,
                body: body.into(),
                delay: Duration::ZERO,
            },
        );
    }

    /// Answers `action` with a fault and HTTP 500.
    pub async fn set_fault(&self, action: SoapAction, fault: &SoapFault) {
        self.set_reply_with_status(action, StatusCode::INTERNAL_SERVER_ERROR, fault_envelope(fault))
            .await;
    }

    /// Delays the reply to `action`.
    pub async fn set_delay(&self, action: SoapAction, delay: Duration) {
        if let Some(reply) = self.state.replies.lock().await.get_mut(&action) {
            reply.delay = delay;
        }
    }

    /// Returns all received requests.
    pub async fn received(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().await.clone()
    }

    /// Builds a client for this server.
    pub fn client(&self) -> XmlDaResult<XmlDaClient> {
        XmlDaClient::builder().server_url(self.url()).build()
    }
}

impl Drop for FakeXmlDaServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.abort();
    }
}

async fn handle_soap(
    State(state): State<Arc<FakeServerState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let soap_action = header("SOAPAction");
    let content_type = header(CONTENT_TYPE.as_str());

    state.received.lock().await.push(ReceivedRequest {
        soap_action: soap_action.clone(),
        content_type,
        body,
    });

    let action = soap_action
        .as_deref()
        .and_then(|v| SoapAction::from_uri(v.trim_matches('"')));

    let reply = match action {
        Some(action) => state.replies.lock().await.get(&action).cloned(),
        None => None,
    };

    let Some(reply) = reply else {
        let fault = SoapFault::new("soap:Client", "Unsupported SOAPAction");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/xml; charset=utf-8")],
            fault_envelope(&fault),
        )
            .into_response();
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        reply.status,
        [(CONTENT_TYPE, "text/xml; charset=utf-8")],
        reply.body,
    )
        .into_response()
}
