use crate::coordinator::CoordinatorHandle;
use crate::signaling::ws_handler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: CoordinatorHandle,
}

/// `/ws` for clients, `/health` and `/stats` for operators.
pub fn router(coordinator: CoordinatorHandle) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .layer(cors)
        .with_state(AppState { coordinator })
}

async fn health() -> &'static str {
    "ok"
}

async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.coordinator.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            error!("Stats unavailable: {}", e);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}
