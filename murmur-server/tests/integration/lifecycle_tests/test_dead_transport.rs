use murmur_core::ServerFrame;
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, expect_paired, expect_waiting, spawn_coordinator};

#[tokio::test]
async fn test_failed_delivery_is_treated_as_disconnect() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut a = TestClient::connect(&handle).await.unwrap();
    let mut b = TestClient::connect(&handle).await.unwrap();

    a.join_random("ara").await.unwrap();
    expect_waiting(a.recv().await.unwrap()).unwrap();
    b.join_random("bin").await.unwrap();
    expect_paired(a.recv().await.unwrap()).unwrap();
    expect_paired(b.recv().await.unwrap()).unwrap();

    // Peer vanishes without the transport reporting it.
    a.into_dead();

    b.chat(json!("are you there?")).await.unwrap();
    assert_eq!(b.recv().await.unwrap(), ServerFrame::PartnerDisconnected {});

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.connections, 1);
    assert_eq!(stats.rooms, 0);
}
