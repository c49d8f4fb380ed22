// Copyright (c) 2025 Kirky.X
//
// Licensed under MIT License
// See LICENSE file in the project root for full license information.

//! Prediction routes
//!
//! `/predict` answers with a 200 envelope unless strict status codes are
//! enabled, in which case failures carry a 4xx/5xx status. Timeouts are
//! one of those failures.

use crate::AppState;
use crate::domain::{
    ModelMetadata, PredictOutcome, PredictRequest, PredictResponse, VocabularyResponse,
};
use crate::error::AppError;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use tracing::warn;

async fn run_prediction(
    state: &AppState,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<PredictResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    // The forward pass is CPU bound; keep it off the async workers.
    let service = state.service.clone();
    let task = tokio::task::spawn_blocking(move || service.predict(&request.symptoms));

    tokio::time::timeout(state.prediction_timeout, task)
        .await
        .map_err(|_| {
            AppError::InferenceError(format!(
                "Prediction timed out after {}s",
                state.prediction_timeout.as_secs_f32()
            ))
        })?
        .map_err(|e| AppError::InferenceError(format!("Prediction task failed: {}", e)))?
}

/// Symptom-based disease prediction
///
/// Accepts symptom names or a pre-encoded feature vector and returns the
/// predicted disease, enriched with descriptive text when available.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "prediction",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Prediction or error envelope", body = PredictOutcome),
        (status = 400, description = "Invalid request (strict status codes only)"),
        (status = 500, description = "Inference failure (strict status codes only)")
    ),
    operation_id = "predict"
)]
pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    match run_prediction(&state, payload).await {
        Ok(response) => Json(PredictOutcome::Success(response)).into_response(),
        Err(e) => {
            warn!("Prediction request failed: {}", e);
            if state.strict_status_codes {
                e.into_response()
            } else {
                Json(PredictOutcome::failure(e)).into_response()
            }
        }
    }
}

/// Symptom vocabulary in feature order
#[utoipa::path(
    get,
    path = "/symptoms",
    tag = "prediction",
    responses(
        (status = 200, description = "Known symptoms", body = VocabularyResponse)
    ),
    operation_id = "list_symptoms"
)]
pub async fn symptoms_handler(State(state): State<AppState>) -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        symptoms: state.service.vocabulary().names().to_vec(),
    })
}

/// Loaded model details
#[utoipa::path(
    get,
    path = "/model/info",
    tag = "model",
    responses(
        (status = 200, description = "Model metadata", body = ModelMetadata)
    ),
    operation_id = "model_info"
)]
pub async fn model_info_handler(State(state): State<AppState>) -> Json<ModelMetadata> {
    Json(state.service.metadata())
}
