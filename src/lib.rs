// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::utils::constants::DEFAULT_TIMEOUT_SECS;

pub use config::{AppConfig, EngineType, InputMode, ModelConfig, ServerConfig};
pub use domain::{DiseaseInfo, PredictOutcome, PredictRequest, PredictResponse, SymptomInput};
pub use engine::{AnyEngine, InferenceEngine};
pub use error::AppError;
pub use routes::create_router;
pub use service::PredictionService;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub strict_status_codes: bool,
    /// Upper bound on one `/predict` call, set from `server.timeout`.
    pub prediction_timeout: Duration,
}

impl AppState {
    pub fn new(service: Arc<PredictionService>) -> Self {
        Self {
            service,
            strict_status_codes: false,
            prediction_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_strict_status_codes(mut self, strict: bool) -> Self {
        self.strict_status_codes = strict;
        self
    }

    pub fn with_prediction_timeout(mut self, timeout: Duration) -> Self {
        self.prediction_timeout = timeout;
        self
    }
}
