use murmur_core::ServerFrame;

use crate::integration::init_tracing;
use crate::utils::{TestClient, expect_room_joined, expect_waiting, spawn_coordinator};

#[tokio::test]
async fn test_join_random_leaves_the_current_room_first() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut a = TestClient::connect(&handle).await.unwrap();
    let mut x = TestClient::connect(&handle).await.unwrap();

    x.join_room("lounge", "xavier").await.unwrap();
    expect_room_joined(x.recv().await.unwrap()).unwrap();
    a.join_room("lounge", "alice").await.unwrap();
    expect_room_joined(a.recv().await.unwrap()).unwrap();
    assert!(matches!(x.recv().await.unwrap(), ServerFrame::UserJoined { .. }));

    a.join_random("alice").await.unwrap();
    expect_waiting(a.recv().await.unwrap()).unwrap();
    assert!(matches!(
        x.recv().await.unwrap(),
        ServerFrame::UserLeft { member_count: 1, .. }
    ));

    // Queued means roomless: chat from alice reaches nobody.
    a.chat(serde_json::json!("anyone?")).await.unwrap();
    x.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_join_room_cancels_a_pending_search() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut a = TestClient::connect(&handle).await.unwrap();
    let mut b = TestClient::connect(&handle).await.unwrap();

    a.join_random("alice").await.unwrap();
    expect_waiting(a.recv().await.unwrap()).unwrap();

    a.join_room("lounge", "alice").await.unwrap();
    let (_, count) = expect_room_joined(a.recv().await.unwrap()).unwrap();
    assert_eq!(count, 1);
    assert_eq!(handle.stats().await.unwrap().waiting, 0);

    b.join_random("bob").await.unwrap();
    expect_waiting(b.recv().await.unwrap()).unwrap();
    a.expect_silence().await.unwrap();
}
