//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_kind: String,
    model_sha256: String,
    timestamp: i64,
}

/// Liveness plus a fingerprint of the classifier being served
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.model.info();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_kind: info.kind.clone(),
        model_sha256: info.sha256.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
