//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::inference::PredictError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Prediction errors (parse, shape, malformed input)
    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Per-request failures are not recovered locally; all surface as 500
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let error_message = self.to_string();

        tracing::error!("Prediction failed: {}", error_message);

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
