// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Client Integration Tests
//!
//! Drives every operation of `XmlDaClient` over a recording mock transport.
//!
//! ## Test Categories
//!
//! - `test_normalize_*`: Fields filled in before sending
//! - `test_default_*`: Default requests match explicit ones
//! - `test_handle_*`: Client request handle generation
//! - `test_reply_*`: Decoding of replies, faults and failures

use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use xmlda_client::error::TransportError;
use xmlda_client::messages::parse_timestamp;
use xmlda_client::{
    Browse, BrowseFilter, GetProperties, GetStatus, ItemValue, Read, RequestOptions, ServerState,
    SoapAction, Subscribe, SubscriptionCancel, SubscriptionPolledRefresh, TypedValue, Write,
    XmlDaClient, XmlDaError, XmlValue,
};
use xmlda_tests::prelude::*;

fn setup() -> (Arc<MockSoapTransport>, XmlDaClient<Arc<MockSoapTransport>>) {
    init_test_logging();
    let mock = Arc::new(MockSoapTransport::new());
    let client = mock_client(mock.clone());
    (mock, client)
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[tokio::test]
async fn test_normalize_get_status_fills_locale_and_handle() {
    let (mock, client) = setup();

    client.get_status().await.unwrap();

    let envelope = mock.last_envelope().unwrap();
    envelope.assert_body_element("GetStatus");
    envelope.assert_attribute("LocaleID", "en-US");
    envelope.assert_attribute("ClientRequestHandle", "0");
}

#[tokio::test]
async fn test_normalize_keeps_caller_locale_and_handle() {
    let (mock, client) = setup();

    let request = GetStatus {
        locale_id: Some("de-DE".into()),
        client_request_handle: Some("caller-7".into()),
    };
    client.get_status_with(request).await.unwrap();

    let envelope = mock.last_envelope().unwrap();
    envelope.assert_attribute("LocaleID", "de-DE");
    envelope.assert_attribute("ClientRequestHandle", "caller-7");
}

#[tokio::test]
async fn test_normalize_empty_locale_falls_back() {
    let (mock, client) = setup();

    client.get_status_in("").await.unwrap();

    mock.last_envelope()
        .unwrap()
        .assert_attribute("LocaleID", "en-US");
}

#[tokio::test]
async fn test_normalize_browse_and_get_properties() {
    let (mock, client) = setup();

    client
        .browse_with(Browse::branch("Static"))
        .await
        .unwrap();
    client
        .get_properties(GetProperties::all_of(["Static/Float"]))
        .await
        .unwrap();

    for action in [SoapAction::Browse, SoapAction::GetProperties] {
        let envelope = &mock.envelopes_for(action)[0];
        envelope.assert_body_element(action.operation_name());
        envelope.assert_attribute("LocaleID", "en-US");
        envelope.client_request_handle();
    }
}

#[tokio::test]
async fn test_normalize_options_forced_on_item_operations() {
    let (mock, client) = setup();

    client.read(Read::items(["Static/Float"])).await.unwrap();
    client
        .write(Write::items(vec![ItemValue::new("Dynamic/Double", 50000.0)]))
        .await
        .unwrap();
    client.subscribe(Subscribe::items(["Static/Int4"])).await.unwrap();
    client
        .subscription_polled_refresh(SubscriptionPolledRefresh::handles([SERVER_SUB_HANDLE]))
        .await
        .unwrap();

    for call in mock.calls() {
        let envelope = &call.envelope;
        envelope.assert_body_element(call.action.operation_name());
        envelope.assert_attribute("ReturnErrorText", "true");
        envelope.assert_attribute("ReturnDiagnosticInfo", "true");
        envelope.assert_attribute("ReturnItemName", "true");
        envelope.assert_attribute("ReturnItemTime", "true");
        envelope.assert_attribute("ReturnItemPath", "false");
        envelope.assert_attribute("LocaleID", "en-US");
        envelope.client_request_handle();
    }
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
async fn test_normalize_preserves_return_item_path() {
    let (mock, client) = setup();

    let request = Read {
        options: Some(RequestOptions {
            return_item_path: true,
            return_error_text: false,
            ..Default::default()
        }),
        ..Read::items(["Static/Float"])
    };
    client.read(request).await.unwrap();

    let envelope = mock.last_envelope().unwrap();
    envelope.assert_attribute("ReturnItemPath", "true");
    envelope.assert_attribute("ReturnErrorText", "true");
}

#[tokio::test]
async fn test_normalize_keeps_request_deadline() {
    let (mock, client) = setup();
    let deadline = parse_timestamp("2024-05-01T12:00:30Z").unwrap();

    let request = Subscribe {
        options: Some(RequestOptions::default().with_request_deadline(deadline)),
        ..Subscribe::items(["Static/Int4"])
    };
    client.subscribe(request).await.unwrap();

    let envelope = mock.last_envelope().unwrap();
    envelope.assert_attribute("RequestDeadline", "2024-05-01T12:00:30+00:00");
    envelope.assert_attribute("LocaleID", "en-US");
    envelope.client_request_handle();
}

#[tokio::test]
async fn test_normalize_subscription_cancel_has_no_locale() {
    let (mock, client) = setup();

    client
        .subscription_cancel(SubscriptionCancel::handle(SERVER_SUB_HANDLE))
        .await
        .unwrap();

    let envelope = mock.last_envelope().unwrap();
    envelope.assert_body_element("SubscriptionCancel");
    envelope.assert_attribute("ServerSubHandle", SERVER_SUB_HANDLE);
    envelope.assert_no_attribute("LocaleID");
    envelope.client_request_handle();
}

// =============================================================================
// Default Request Tests
// =============================================================================

#[tokio::test]
async fn test_default_get_status_matches_explicit_default() {
    let (mock, client) = setup();

    client.get_status().await.unwrap();
    client.get_status_with(GetStatus::default()).await.unwrap();

    let envelopes = mock.envelopes_for(SoapAction::GetStatus);
    let first = envelopes[0].replace("ClientRequestHandle=\"0\"", "ClientRequestHandle=\"1\"");
    assert_eq!(first, envelopes[1]);
}

#[tokio::test]
async fn test_default_browse_matches_explicit_default() {
    let (mock, client) = setup();

    client.browse().await.unwrap();
    client
        .browse_customized(|r| r.browse_filter = BrowseFilter::All)
        .await
        .unwrap();

    let envelopes = mock.envelopes_for(SoapAction::Browse);
    let first = envelopes[0].replace("ClientRequestHandle=\"0\"", "ClientRequestHandle=\"1\"");
    assert_eq!(first, envelopes[1]);
    envelopes[0].assert_attribute("BrowseFilter", "all");
}

#[tokio::test]
async fn test_default_customized_handle_not_replaced() {
    let (mock, client) = setup();

    client
        .get_status_customized(|r| r.client_request_handle = Some("fixed".into()))
        .await
        .unwrap();
    client.get_status().await.unwrap();

    let envelopes = mock.envelopes_for(SoapAction::GetStatus);
    envelopes[0].assert_attribute("ClientRequestHandle", "fixed");
    // A caller handle does not consume a generated one.
    envelopes[1].assert_attribute("ClientRequestHandle", "0");
}

// =============================================================================
// Handle Tests
// =============================================================================

#[tokio::test]
async fn test_handle_seed_and_sequence() {
    init_test_logging();
    let mock = Arc::new(MockSoapTransport::new());
    let client = XmlDaClient::builder()
        .handle_seed(1000)
        .build_with_transport(mock.clone())
        .unwrap();

    client.get_status().await.unwrap();
    client.read(Read::items(["a"])).await.unwrap();
    let manual = client.generate_client_request_handle();

    let calls = mock.calls();
    calls[0].envelope.assert_attribute("ClientRequestHandle", "1000");
    calls[1].envelope.assert_attribute("ClientRequestHandle", "1001");
    assert_eq!(manual, "1002");
}

#[tokio::test]
async fn test_handle_distinct_under_concurrency() {
    let (mock, client) = setup();
    let client = Arc::new(client);
    mock.set_latency(Duration::from_millis(1));

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    client.get_status().await.map(|_| ())
                } else {
                    client.read(Read::items(["Static/Float"])).await.map(|_| ())
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let envelopes: Vec<String> = mock.calls().into_iter().map(|c| c.envelope).collect();
    assert_eq!(envelopes.len(), 32);
    assert_distinct_handles(&envelopes);
    assert_eq!(client.stats().total_calls(), 32);
}

#[tokio::test]
async fn test_handle_generated_values_unique() {
    let (_mock, client) = setup();

    let handles: HashSet<String> = (0..1000)
        .map(|_| client.generate_client_request_handle())
        .collect();

    assert_eq!(handles.len(), 1000);
}

// =============================================================================
// Reply Tests
// =============================================================================

#[tokio::test]
async fn test_reply_get_status_decoded() {
    let (_mock, client) = setup();

    let response = client.get_status().await.unwrap();

    assert_eq!(response.server_state(), Some(ServerState::Running));
    let status = response.status.unwrap();
    assert_eq!(status.product_version.as_deref(), Some("1.0.0"));
    assert_eq!(status.supported_locale_ids, vec!["en-US", "de-DE"]);
    assert!(status.start_time().is_some());
}

#[tokio::test]
async fn test_reply_read_values_and_item_errors() {
    let (mock, client) = setup();
    mock.set_reply(
        SoapAction::Read,
        ReplyFixtures::read(&[("Static/Int4", "xsd:int", "-17"), ("Static/Bool", "xsd:boolean", "true")]),
    );

    let response = client
        .read(Read::items(["Static/Int4", "Static/Bool"]))
        .await
        .unwrap();

    let int = response.item("Static/Int4").unwrap();
    assert_eq!(int.value.as_ref().map(XmlValue::typed), Some(TypedValue::Int(-17)));
    assert!(int.is_good());
    assert!(int.timestamp().is_some());
    assert_eq!(
        response.item("Static/Bool").and_then(|i| i.value.as_ref()).and_then(XmlValue::as_bool),
        Some(true)
    );

    mock.set_reply(SoapAction::Read, ReplyFixtures::read_unknown_item("Gone"));
    let response = client.read(Read::items(["Gone"])).await.unwrap();
    let gone = response.item("Gone").unwrap();
    assert_eq!(gone.result_code(), Some("E_UNKNOWNITEMNAME"));
    assert_eq!(response.errors[0].code(), "E_UNKNOWNITEMNAME");
}

#[tokio::test]
async fn test_reply_subscription_lifecycle() {
    let (mock, client) = setup();

    let subscribed = client
        .subscribe(Subscribe::items(["Static/Int4"]))
        .await
        .unwrap();
    let handle = subscribed.server_sub_handle.clone().unwrap();
    assert_eq!(handle, SERVER_SUB_HANDLE);

    let refresh = client
        .subscription_polled_refresh(SubscriptionPolledRefresh::handles([handle.clone()]))
        .await
        .unwrap();
    let values: Vec<_> = refresh.items().collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value.as_ref().and_then(XmlValue::as_i64), Some(42));

    client
        .subscription_cancel(SubscriptionCancel::handle(handle))
        .await
        .unwrap();

    let actions: Vec<SoapAction> = mock.calls().iter().map(|c| c.action).collect();
    assert_eq!(
        actions,
        vec![
            SoapAction::Subscribe,
            SoapAction::SubscriptionPolledRefresh,
            SoapAction::SubscriptionCancel
        ]
    );
}

#[tokio::test]
async fn test_reply_fault_is_error() {
    let (mock, client) = setup();
    mock.set_reply(
        SoapAction::Write,
        ReplyFixtures::client_fault("Item is read only", "E_READONLY"),
    );

    let err = client
        .write(Write::items(vec![ItemValue::new("Static/Float", 1.0)]))
        .await
        .unwrap_err();

    err.assert_fault("Client");
    match err {
        xmlda_client::XmlDaError::Fault(fault) => {
            assert_eq!(fault.reason, "Item is read only");
            assert_eq!(fault.detail.as_deref(), Some("E_READONLY"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(client.stats().failures(), 1);
}

#[tokio::test]
async fn test_reply_malformed_and_mismatched() {
    let (mock, client) = setup();

    mock.set_reply(SoapAction::GetStatus, ReplyFixtures::malformed());
    client.get_status().await.unwrap_err().assert_decoding();

    mock.set_reply(SoapAction::GetStatus, ReplyFixtures::browse());
    client.get_status().await.unwrap_err().assert_decoding();
}

#[tokio::test]
async fn test_reply_transport_failure_not_retried() {
    let (mock, client) = setup();
    mock.fail_next_call();

    client.get_status().await.unwrap_err().assert_transport();
    assert_eq!(mock.call_count(), 1);

    client.get_status().await.unwrap();
    assert_eq!(mock.call_count(), 2);
    assert_eq!(client.stats().total_calls(), 1);
    assert_eq!(client.stats().failures(), 1);
}

#[tokio::test]
async fn test_reply_transport_down_for_every_call() {
    let (mock, client) = setup();
    mock.fail_all_calls(true);

    client.get_status().await.unwrap_err().assert_transport();
    client.browse().await.unwrap_err().assert_transport();
    client
        .read(Read::items(["Static/Float"]))
        .await
        .unwrap_err()
        .assert_transport();
    assert_eq!(mock.call_count(), 3);
    assert_eq!(client.stats().failures(), 3);

    mock.fail_all_calls(false);
    client.get_status().await.unwrap();
    assert_eq!(client.stats().total_calls(), 1);
}

#[tokio::test]
async fn test_reply_same_fault_for_every_action() {
    let (mock, client) = setup();
    mock.set_reply_for_all(ReplyFixtures::server_fault("Server is shutting down"));

    client.get_status().await.unwrap_err().assert_fault("Server");
    client.browse().await.unwrap_err().assert_fault("Server");
    client
        .subscription_cancel(SubscriptionCancel::handle(SERVER_SUB_HANDLE))
        .await
        .unwrap_err()
        .assert_fault("Server");
}

// =============================================================================
// Error Logging Tests
// =============================================================================

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_log(error: &XmlDaError, context: &str) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || error.log(context));
    log.contents()
}

#[tokio::test]
async fn test_error_log_level_follows_severity() {
    let (mock, client) = setup();
    mock.set_reply(
        SoapAction::Read,
        ReplyFixtures::server_fault("Device not responding"),
    );
    let fault = client.read(Read::items(["Static/Float"])).await.unwrap_err();

    let output = capture_log(&fault, "reading line 3");
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("XD-0301"), "{output}");
    assert!(output.contains("reading line 3"), "{output}");
    assert!(output.contains("Device not responding"), "{output}");

    let timeout = XmlDaError::transport(TransportError::timed_out(
        MOCK_ENDPOINT,
        Duration::from_secs(5),
    ));
    let output = capture_log(&timeout, "polling");
    assert!(output.contains("WARN"), "{output}");
    assert!(!output.contains("ERROR"), "{output}");
    assert!(output.contains(&timeout.error_code().to_string()), "{output}");
}
