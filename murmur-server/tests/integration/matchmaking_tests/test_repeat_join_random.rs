use crate::integration::init_tracing;
use crate::utils::{TestClient, expect_paired, expect_waiting, spawn_coordinator};

#[tokio::test]
async fn test_repeated_join_random_does_not_enqueue_twice() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut a = TestClient::connect(&handle).await.unwrap();
    let mut b = TestClient::connect(&handle).await.unwrap();
    let mut c = TestClient::connect(&handle).await.unwrap();

    a.join_random("alice").await.unwrap();
    a.join_random("alice").await.unwrap();
    expect_waiting(a.recv().await.unwrap()).unwrap();
    expect_waiting(a.recv().await.unwrap()).unwrap();
    assert_eq!(handle.stats().await.unwrap().waiting, 1);

    b.join_random("bob").await.unwrap();
    expect_paired(b.recv().await.unwrap()).unwrap();
    expect_paired(a.recv().await.unwrap()).unwrap();

    // A second queue slot for alice would pair carol with her here.
    c.join_random("carol").await.unwrap();
    expect_waiting(c.recv().await.unwrap()).unwrap();
    a.expect_silence().await.unwrap();

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.rooms, 1);
    assert_eq!(stats.waiting, 1);
}
