// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! A [`SoapTransport`] that records every call and answers with canned
//! envelopes, with latency and failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use xmlda_client::error::TransportError;
use xmlda_client::soap::SoapAction;
use xmlda_client::{SoapTransport, XmlDaClient, XmlDaResult};

use super::fixtures::ReplyFixtures;

/// Endpoint name reported by [`MockSoapTransport`].
pub const MOCK_ENDPOINT: &str = "mock://xmlda";

/// A recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Action the envelope was sent with.
    pub action: SoapAction,
    /// The serialized envelope.
    pub envelope: String,
}

// =============================================================================
// MockSoapTransport
// =============================================================================

/// A configurable mock transport.
#[derive(Debug)]
pub struct MockSoapTransport {
    /// Reply per action.
    replies: Mutex<HashMap<SoapAction, String>>,

    /// Recorded calls, in send order.
    calls: Mutex<Vec<RecordedCall>>,

    /// Simulated round trip latency.
    latency: Mutex<Duration>,

    /// Force next call to fail.
    fail_next: AtomicBool,

    /// Force all calls to fail.
    fail_all: AtomicBool,

    /// Call count for verification.
    call_count: AtomicU64,
}

impl MockSoapTransport {
    /// Creates a mock answering every action with its fixture reply.
    pub fn new() -> Self {
        let replies = SoapAction::ALL
            .iter()
            .map(|action| (*action, ReplyFixtures::for_action(*action)))
            .collect();

        Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
            latency: Mutex::new(Duration::ZERO),
            fail_next: AtomicBool::new(false),
            fail_all: AtomicBool::new(false),
            call_count: AtomicU64::new(0),
        }
    }

    /// Sets the reply for an action.
    pub fn set_reply(&self, action: SoapAction, envelope: impl Into<String>) {
        self.replies
            .lock()
            .expect("reply table poisoned")
            .insert(action, envelope.into());
    }

    /// Answers every action with the same envelope.
    pub fn set_reply_for_all(&self, envelope: impl Into<String>) {
        let envelope = envelope.into();
        let mut replies = self.replies.lock().expect("reply table poisoned");
        for action in SoapAction::ALL {
            replies.insert(action, envelope.clone());
        }
    }

    /// Sets simulated latency.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().expect("latency poisoned") = latency;
    }

    /// Makes the next call fail.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Makes all calls fail.
    pub fn fail_all_calls(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    /// Returns the envelopes sent with `action`.
    pub fn envelopes_for(&self, action: SoapAction) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.action == action)
            .map(|c| c.envelope)
            .collect()
    }

    /// Returns the most recent envelope.
    pub fn last_envelope(&self) -> Option<String> {
        self.calls().pop().map(|c| c.envelope)
    }

    /// Returns the number of calls.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Clears recorded calls.
    pub fn clear(&self) {
        self.calls.lock().expect("call log poisoned").clear();
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockSoapTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SoapTransport for MockSoapTransport {
    async fn call(&self, action: SoapAction, envelope: String) -> XmlDaResult<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(RecordedCall { action, envelope });

        let latency = *self.latency.lock().expect("latency poisoned");
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.fail_next.swap(false, Ordering::SeqCst) || self.fail_all.load(Ordering::SeqCst) {
            return Err(TransportError::other(MOCK_ENDPOINT, "simulated connection failure").into());
        }

        let reply = self
            .replies
            .lock()
            .expect("reply table poisoned")
            .get(&action)
            .cloned();

        reply.ok_or_else(|| {
            TransportError::other(MOCK_ENDPOINT, format!("no reply configured for {action}")).into()
        })
    }

    fn endpoint(&self) -> &str {
        MOCK_ENDPOINT
    }
}

/// Builds a client with default settings over a shared mock.
pub fn mock_client(mock: Arc<MockSoapTransport>) -> XmlDaClient<Arc<MockSoapTransport>> {
    XmlDaClient::builder()
        .build_with_transport(mock)
        .expect("Failed to build client over mock transport")
}
