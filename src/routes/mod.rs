// Copyright (c) 2025 Kirky.X
//
// Licensed under MIT License
// See LICENSE file in the project root for full license information.

//! 路由模块
//!
//! 本模块包含所有 API 路由定义，将路由从 main.rs 中分离出来以提高可维护性。

pub(crate) mod health;
pub(crate) mod prediction;

use axum::{Json, Router, routing::get, routing::post};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::AppState;
use crate::config::ServerConfig;
use crate::utils::constants::DEFAULT_TIMEOUT_SECS;
use std::time::Duration;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SymptoBuddy API",
        version = "0.1.0",
        description = "Symptom-based disease prediction service",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        health::health_check,
        prediction::predict_handler,
        prediction::symptoms_handler,
        prediction::model_info_handler,
    ),
    components(
        schemas(
            crate::domain::PredictRequest,
            crate::domain::SymptomInput,
            crate::domain::PredictResponse,
            crate::domain::PredictOutcome,
            crate::domain::DiseaseInfo,
            crate::domain::VocabularyResponse,
            crate::domain::ModelMetadata,
        )
    ),
    tags(
        (name = "health", description = "健康检查"),
        (name = "prediction", description = "Disease prediction"),
        (name = "model", description = "Model details")
    )
)]
pub(crate) struct ApiDoc;

pub(crate) fn create_openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(create_openapi())
}

/// Create the application router
///
/// `/predict` enforces `server.timeout` itself so that a slow forward pass
/// still answers with the error envelope; the other routes use
/// `TimeoutLayer`. CORS is wide open when `server.cors_permissive` is set;
/// that is meant for local development against the browser client.
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Router {
    let timeout = Duration::from_secs(server.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS));
    let app_state = app_state.with_prediction_timeout(timeout);

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/symptoms", get(prediction::symptoms_handler))
        .route("/model/info", get(prediction::model_info_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TimeoutLayer::new(timeout))
        .route("/predict", post(prediction::predict_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    if server.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = create_openapi();
        for path in ["/health", "/predict", "/symptoms", "/model/info"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
