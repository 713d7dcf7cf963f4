//! Liveness handler.

use axum::{extract::State, Json};

use super::super::types::{AppState, HealthResponse};

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.queue.snapshot();
    Json(HealthResponse {
        status: "ok",
        queue_length: snapshot.queue_length,
        worker_running: snapshot.worker_running,
    })
}
