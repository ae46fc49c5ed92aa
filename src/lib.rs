//! Iris Classifier Inference Server
//!
//! Serves a pre-trained iris classifier over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       IRIS-SERVE                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  /predict_class_postman      /predict_class_curl          │
//! │  (query string)              (form field `input`, JSON)   │
//! │         └──────────────┬──────────────┘                   │
//! │                        ▼                                  │
//! │              inference::predict                           │
//! │   parse lists → FeatureFrame → Classifier → "y_pred"      │
//! │                        ▲                                  │
//! │              Arc<IrisModel> (loaded once, read-only)      │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod inference;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};
pub use inference::IrisModel;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<IrisModel>,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Prediction routes accept both GET and POST
    let predict_routes = Router::new()
        .route(
            "/predict_class_postman",
            get(handlers::predict::predict_class_postman)
                .post(handlers::predict::predict_class_postman),
        )
        .route(
            "/predict_class_curl",
            get(handlers::predict::predict_class_curl)
                .post(handlers::predict::predict_class_curl),
        );

    let info_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/model", get(handlers::model::info));

    Router::new()
        .merge(predict_routes)
        .merge(info_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
