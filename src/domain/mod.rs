// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PredictRequest {
    pub symptoms: SymptomInput,
}

/// Either symptom names or an already encoded feature vector.
///
/// An empty array is read as an empty name list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(
    untagged,
    expecting = "`symptoms` must be an array of symptom names or an array of numbers"
)]
pub enum SymptomInput {
    Names(Vec<String>),
    Vector(Vec<f32>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DiseaseInfo {
    pub overview: String,
    pub causes: Vec<String>,
    pub symptoms: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PredictResponse {
    pub predicted_disease: String,
    /// Present only when enrichment is enabled.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub info: Option<DiseaseInfo>,
}

/// Payload returned by `/predict`: the prediction, or an `error` message.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PredictOutcome {
    Success(PredictResponse),
    Failure { error: String },
}

impl PredictOutcome {
    pub fn failure(error: impl ToString) -> Self {
        PredictOutcome::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictOutcome::Success(_))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VocabularyResponse {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelMetadata {
    pub engine: String,
    pub input_dim: usize,
    pub classes: Vec<String>,
    pub input_mode: String,
    pub enrichment_enabled: bool,
    pub loaded_at: String,
}
