use crate::error::FrameError;
use crate::signaling::{AppState, decode_frame, encode_frame};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let coordinator = state.coordinator;

    let (connection_id, mut rx) = match coordinator.connect().await {
        Ok(pair) => pair,
        Err(e) => {
            error!("Cannot register WebSocket connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let text = match encode_frame(&frame) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize {}: {}", frame.kind(), e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let coordinator = coordinator.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                let decoded = match msg {
                    Message::Text(text) => decode_frame(&text),
                    Message::Binary(_) => Err(FrameError::Binary),
                    Message::Close(_) => break,
                    _ => continue,
                };

                match decoded {
                    Ok(frame) => {
                        if let Err(e) = coordinator.send_frame(connection_id, frame).await {
                            error!("Coordinator died: {}", e);
                            break;
                        }
                    }
                    Err(e) => warn!("Dropping frame from {}: {}", connection_id, e),
                }
            }
            debug!("Reader for {} finished", connection_id);
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    let _ = coordinator.disconnect(connection_id).await;
    info!("WebSocket disconnected: {}", connection_id);
}
