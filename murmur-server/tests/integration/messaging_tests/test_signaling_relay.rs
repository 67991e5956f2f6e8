use murmur_core::{ClientFrame, ServerFrame};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, expect_paired, expect_room_joined, expect_waiting, spawn_coordinator};

fn payload(value: serde_json::Value) -> murmur_core::SignalPayload {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("Expected a JSON object, got {}", other),
    }
}

#[tokio::test]
async fn test_signaling_frames_are_relayed_verbatim_to_the_partner() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut a = TestClient::connect(&handle).await.unwrap();
    let mut b = TestClient::connect(&handle).await.unwrap();

    a.join_random("ara").await.unwrap();
    expect_waiting(a.recv().await.unwrap()).unwrap();
    b.join_random("bin").await.unwrap();
    expect_paired(a.recv().await.unwrap()).unwrap();
    expect_paired(b.recv().await.unwrap()).unwrap();

    let offer = payload(json!({"offer": {"type": "offer", "sdp": "v=0\r\no=- 1 1 IN IP4 0.0.0.0"}}));
    a.send(ClientFrame::VideoOffer(offer.clone())).await.unwrap();
    assert_eq!(b.recv().await.unwrap(), ServerFrame::VideoOffer(offer));

    let answer = payload(json!({"answer": {"type": "answer", "sdp": "v=0"}}));
    b.send(ClientFrame::VideoAnswer(answer.clone())).await.unwrap();
    assert_eq!(a.recv().await.unwrap(), ServerFrame::VideoAnswer(answer));

    let candidate = payload(json!({"candidate": {"candidate": "candidate:1 1 udp 2122260223 10.0.0.1 54400 typ host", "sdpMid": "0", "sdpMLineIndex": 0}}));
    a.send(ClientFrame::IceCandidate(candidate.clone())).await.unwrap();
    assert_eq!(b.recv().await.unwrap(), ServerFrame::IceCandidate(candidate));

    a.expect_silence().await.unwrap();
    b.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_signaling_fans_out_in_named_rooms() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut clients = Vec::new();
    for name in ["ara", "bin", "cho"] {
        let mut client = TestClient::connect(&handle).await.unwrap();
        client.join_room("voice", name).await.unwrap();
        expect_room_joined(client.recv().await.unwrap()).unwrap();
        clients.push(client);
    }
    clients[0].recv().await.unwrap();
    clients[0].recv().await.unwrap();
    clients[1].recv().await.unwrap();

    let offer = payload(json!({"sdp": "v=0", "target": "anyone"}));
    clients[2]
        .send(ClientFrame::VideoOffer(offer.clone()))
        .await
        .unwrap();

    for client in clients.iter_mut().take(2) {
        assert_eq!(
            client.recv().await.unwrap(),
            ServerFrame::VideoOffer(offer.clone())
        );
    }
    clients[2].expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_signaling_without_a_room_is_dropped() {
    init_tracing();
    let handle = spawn_coordinator();

    let mut a = TestClient::connect(&handle).await.unwrap();
    a.send(ClientFrame::IceCandidate(payload(json!({"candidate": "x"}))))
        .await
        .unwrap();

    a.expect_silence().await.unwrap();
    assert_eq!(handle.stats().await.unwrap().connections, 1);
}
