// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Live Server Tests
//!
//! Run against a real XML-DA server named by `XMLDA_TEST_SERVER_URL`:
//!
//! ```bash
//! XMLDA_TEST_SERVER_URL=http://host/XMLDA/opcxmldaserver.asmx \
//!     cargo test -p xmlda-tests --test integration_live -- --ignored
//! ```
//!
//! Item names follow the OPC sample server address space.

use xmlda_client::{
    ItemValue, Read, Subscribe, SubscriptionCancel, SubscriptionPolledRefresh, Write, XmlDaClient,
};
use xmlda_tests::prelude::*;

fn live_client() -> Option<XmlDaClient> {
    init_test_logging();
    let url = std::env::var("XMLDA_TEST_SERVER_URL").ok()?;
    Some(
        XmlDaClient::builder()
            .server_url(url)
            .extended_timeouts()
            .build()
            .expect("Invalid XMLDA_TEST_SERVER_URL"),
    )
}

#[tokio::test]
#[ignore]
async fn test_live_status_and_browse() {
    let Some(client) = live_client() else { return };

    let status = client.get_status().await.unwrap();
    assert!(status.server_state().is_some());

    let browse = client.browse().await.unwrap();
    assert!(!browse.elements.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_live_write_then_read() {
    let Some(client) = live_client() else { return };
    let item = "Dynamic/Analog Types/Double";

    let write = client
        .write(Write::items(vec![ItemValue::new(item, 50000.0)]))
        .await
        .unwrap();
    assert!(write.items().iter().all(|i| i.result_code().is_none()));

    let read = client.read(Read::items([item])).await.unwrap();
    assert!(read.item(item).is_some());
}

#[tokio::test]
#[ignore]
async fn test_live_subscription() {
    let Some(client) = live_client() else { return };

    let sub = client
        .subscribe(Subscribe::items(["Dynamic/Analog Types/Int"]))
        .await
        .unwrap();
    let handle = sub.server_sub_handle.expect("Server returned no subscription handle");

    client
        .subscription_polled_refresh(SubscriptionPolledRefresh::handles([handle.clone()]))
        .await
        .unwrap();
    client
        .subscription_cancel(SubscriptionCancel::handle(handle))
        .await
        .unwrap();
}
