// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # HTTP Transport Integration Tests
//!
//! Runs the client over real HTTP against [`FakeXmlDaServer`].

use std::time::Duration;

use axum::http::StatusCode;
use xmlda_client::error::TransportError;
use xmlda_client::{
    ItemValue, Read, SoapAction, SoapFault, Write, XmlDaClient, XmlDaError, XMLDA_NAMESPACE,
};
use xmlda_tests::prelude::*;

async fn server() -> FakeXmlDaServer {
    init_test_logging();
    FakeXmlDaServer::start()
        .await
        .expect("Failed to start fake server")
}

// =============================================================================
// Request Format Tests
// =============================================================================

#[tokio::test]
async fn test_http_headers_and_body() {
    let server = server().await;
    let client = server.client().unwrap();

    client.get_status().await.unwrap();
    client.read(Read::items(["Static/Float"])).await.unwrap();

    let received = server.received().await;
    assert_eq!(received.len(), 2);

    let status = &received[0];
    assert_eq!(
        status.soap_action.as_deref(),
        Some(format!("\"{XMLDA_NAMESPACE}GetStatus\"").as_str())
    );
    assert_eq!(
        status.content_type.as_deref(),
        Some("text/xml; charset=utf-8")
    );
    status.body.assert_body_element("GetStatus");
    status.body.assert_attribute("LocaleID", "en-US");

    let read = &received[1];
    assert_eq!(
        read.soap_action.as_deref(),
        Some("\"http://opcfoundation.org/webservices/XMLDA/1.0/Read\"")
    );
    read.body.assert_body_element("Read");
    read.body.assert_attribute("ReturnItemTime", "true");
}

#[tokio::test]
async fn test_http_every_action_round_trips() {
    let server = server().await;
    let client = server.client().unwrap();

    client.get_status().await.unwrap();
    client.browse().await.unwrap();
    client
        .get_properties(xmlda_client::GetProperties::all_of(["Static/Float"]))
        .await
        .unwrap();
    client.read(Read::items(["Static/Float"])).await.unwrap();
    client
        .write(Write::items(vec![ItemValue::new("Dynamic/Double", 50000.0)]))
        .await
        .unwrap();
    let sub = client
        .subscribe(xmlda_client::Subscribe::items(["Static/Int4"]))
        .await
        .unwrap();
    let handle = sub.server_sub_handle.unwrap();
    client
        .subscription_polled_refresh(xmlda_client::SubscriptionPolledRefresh::handles([
            handle.clone(),
        ]))
        .await
        .unwrap();
    client
        .subscription_cancel(xmlda_client::SubscriptionCancel::handle(handle))
        .await
        .unwrap();

    let received = server.received().await;
    let actions: Vec<String> = received
        .iter()
        .filter_map(|r| r.soap_action.clone())
        .collect();
    let expected: Vec<String> = SoapAction::ALL
        .iter()
        .map(|a| a.header_value())
        .collect();
    assert_eq!(actions, expected);
    assert_distinct_handles(&received.iter().map(|r| r.body.clone()).collect::<Vec<_>>());
    assert_eq!(client.stats().total_calls(), 8);
}

#[tokio::test]
async fn test_http_write_value_typed() {
    let server = server().await;
    let client = server.client().unwrap();

    client
        .write(Write::items(vec![ItemValue::new(
            "Dynamic/Analog Types/Double",
            50000.0,
        )]))
        .await
        .unwrap();

    let body = &server.received().await[0].body;
    assert!(body.contains("ItemName=\"Dynamic/Analog Types/Double\""));
    assert!(body.contains("xsi:type=\"xsd:double\""));
    assert!(body.contains(">50000</Value>"));
}

// =============================================================================
// Failure Tests
// =============================================================================

#[tokio::test]
async fn test_http_fault_with_status_500() {
    let server = server().await;
    server
        .set_fault(
            SoapAction::GetStatus,
            &SoapFault::new("soap:Server", "Server is shutting down"),
        )
        .await;
    let client = server.client().unwrap();

    let err = client.get_status().await.unwrap_err();

    err.assert_fault("Server");
    assert!(err.to_string().contains("Server is shutting down"));
}

#[tokio::test]
async fn test_http_fault_with_status_200() {
    let server = server().await;
    server
        .set_reply(
            SoapAction::Read,
            ReplyFixtures::client_fault("Bad item list", "E_INVALIDITEMNAME"),
        )
        .await;
    let client = server.client().unwrap();

    let err = client.read(Read::items([""])).await.unwrap_err();

    err.assert_fault("Client");
}

#[tokio::test]
async fn test_http_status_without_fault() {
    let server = server().await;
    server
        .set_reply_with_status(SoapAction::Browse, StatusCode::SERVICE_UNAVAILABLE, "busy")
        .await;
    let client = server.client().unwrap();

    let err = client.browse().await.unwrap_err();

    match err {
        XmlDaError::Transport(TransportError::HttpStatus { status, body, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "busy");
        }
        other => panic!("Expected HTTP status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_missing_route() {
    let server = server().await;
    let client = XmlDaClient::builder()
        .server_url(server.missing_url())
        .build()
        .unwrap();

    let err = client.get_status().await.unwrap_err();

    assert!(matches!(
        err,
        XmlDaError::Transport(TransportError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_http_request_timeout() {
    let server = server().await;
    server
        .set_delay(SoapAction::GetStatus, Duration::from_millis(1_500))
        .await;
    let client = XmlDaClient::builder()
        .server_url(server.url())
        .request_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.get_status().await.unwrap_err();

    err.assert_transport();
    assert!(matches!(
        err,
        XmlDaError::Transport(TransportError::TimedOut { .. })
    ));
}

#[tokio::test]
async fn test_http_connection_refused() {
    let server = server().await;
    let url = server.url();
    drop(server);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = XmlDaClient::builder().server_url(url).build().unwrap();

    client.get_status().await.unwrap_err().assert_transport();
}
