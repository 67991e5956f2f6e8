use murmur_core::ServerFrame;
use murmur_server::{OverflowPolicy, ServerConfig};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, expect_paired, expect_room_joined, spawn_coordinator_with};

fn tiny_buffers(overflow_policy: OverflowPolicy) -> ServerConfig {
    ServerConfig {
        outbound_buffer: 1,
        overflow_policy,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn test_slow_peer_is_disconnected_on_overflow() {
    init_tracing();
    let handle = spawn_coordinator_with(tiny_buffers(OverflowPolicy::Disconnect));

    let mut slow = TestClient::connect(&handle).await.unwrap();
    let mut fast = TestClient::connect(&handle).await.unwrap();

    slow.join_room("lounge", "slow").await.unwrap();
    expect_room_joined(slow.recv().await.unwrap()).unwrap();
    fast.join_room("lounge", "fast").await.unwrap();
    expect_room_joined(fast.recv().await.unwrap()).unwrap();
    // slow's single slot now holds user_joined and is never read.

    fast.chat(json!("one")).await.unwrap();
    assert!(matches!(
        fast.recv().await.unwrap(),
        ServerFrame::UserLeft { member_count: 1, .. }
    ));

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.connections, 1);
    assert!(slow.is_closed().await.unwrap());
}

#[tokio::test]
async fn test_slow_peer_only_loses_frames_with_drop_policy() {
    init_tracing();
    let handle = spawn_coordinator_with(tiny_buffers(OverflowPolicy::Drop));

    let mut slow = TestClient::connect(&handle).await.unwrap();
    let mut fast = TestClient::connect(&handle).await.unwrap();

    slow.join_room("lounge", "slow").await.unwrap();
    expect_room_joined(slow.recv().await.unwrap()).unwrap();
    fast.join_room("lounge", "fast").await.unwrap();
    expect_room_joined(fast.recv().await.unwrap()).unwrap();

    fast.chat(json!("one")).await.unwrap();
    fast.chat(json!("two")).await.unwrap();
    fast.expect_silence().await.unwrap();
    assert_eq!(handle.stats().await.unwrap().connections, 2);

    assert!(matches!(slow.recv().await.unwrap(), ServerFrame::UserJoined { .. }));
    slow.expect_silence().await.unwrap();

    fast.chat(json!("three")).await.unwrap();
    assert!(matches!(
        slow.recv().await.unwrap(),
        ServerFrame::MessageReceived { message, .. } if message == json!("three")
    ));
}

#[tokio::test]
async fn test_drop_policy_disconnects_instead_of_losing_a_pairing() {
    init_tracing();
    let handle = spawn_coordinator_with(tiny_buffers(OverflowPolicy::Drop));

    let mut ara = TestClient::connect(&handle).await.unwrap();
    let mut bo = TestClient::connect(&handle).await.unwrap();

    ara.join_random("ara").await.unwrap();
    // ara's single slot now holds random_waiting and is never read.
    bo.join_random("bo").await.unwrap();

    let (_, partner) = expect_paired(bo.recv().await.unwrap()).unwrap();
    assert_eq!(partner, "ara");

    // ara cannot be told about the pairing, so it is torn down. bo's slot
    // was holding random_paired when partner_disconnected came, so bo goes too.
    assert!(ara.is_closed().await.unwrap());
    assert!(bo.is_closed().await.unwrap());

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.connections, 0);
    assert_eq!(stats.rooms, 0);
    assert_eq!(stats.waiting, 0);
}
