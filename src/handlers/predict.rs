//! Prediction handlers
//!
//! Two transports for the same prediction: feature lists in the query
//! string, or a JSON mapping in the `input` form field. The form may be
//! urlencoded or multipart.

use axum::{
    extract::{rejection::QueryRejection, FromRequest, Form, Multipart, Query, Request, State},
    http::header,
    Json,
};
use serde::Deserialize;

use crate::{AppState, AppResult};
use crate::inference::{self, PredictError};
use crate::models::{FeatureParams, PredictionResponse};

#[derive(Debug, Deserialize)]
pub struct CurlForm {
    pub input: Option<String>,
}

/// Features passed as `?sepLen=..&sepWid=..&petLen=..&petWid=..`
pub async fn predict_class_postman(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Query(pairs) = query
        .map_err(|e| PredictError::MalformedInput(e.body_text()))?;

    let params = FeatureParams::from_query_pairs(pairs)?;

    let response = inference::predict(state.model.as_ref(), params)?;
    Ok(Json(response))
}

/// Features passed as a JSON object in the `input` form field
pub async fn predict_class_curl(
    State(state): State<AppState>,
    request: Request,
) -> AppResult<Json<PredictionResponse>> {
    let input = if is_multipart(&request) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| PredictError::MalformedInput(e.body_text()))?;
        multipart_input(multipart).await?
    } else {
        let Form(form) = Form::<CurlForm>::from_request(request, &state)
            .await
            .map_err(|e| PredictError::MalformedInput(e.body_text()))?;
        form.input
    };

    let input = input
        .ok_or_else(|| PredictError::MalformedInput("missing form field `input`".to_string()))?;

    let params = parse_input_mapping(&input)?;

    let response = inference::predict(state.model.as_ref(), params)?;
    Ok(Json(response))
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Text of the first `input` part, if any
async fn multipart_input(mut multipart: Multipart) -> Result<Option<String>, PredictError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PredictError::MalformedInput(e.body_text()))?
    {
        if field.name() == Some("input") {
            let text = field
                .text()
                .await
                .map_err(|e| PredictError::MalformedInput(e.body_text()))?;
            return Ok(Some(text));
        }
    }

    Ok(None)
}

/// Strict JSON decoding of the `input` mapping
pub fn parse_input_mapping(input: &str) -> Result<FeatureParams, PredictError> {
    serde_json::from_str(input)
        .map_err(|e| PredictError::MalformedInput(format!("invalid `input` mapping: {}", e)))
}
