//! Loaded model metadata handler

use axum::{extract::State, Json};

use crate::AppState;
use crate::inference::ModelInfo;

pub async fn info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.model.info().clone())
}
