// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::InferenceEngine;
use crate::config::model::ModelConfig;
use crate::error::AppError;
use crate::model::loader::verify_artifact;
use crate::utils::validate_dimension;
use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::{Tensor, ValueType};
use std::sync::Mutex;

pub struct OnnxEngine {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    input_dim: Option<usize>,
    num_classes: Option<usize>,
}

impl OnnxEngine {
    pub fn new(config: &ModelConfig) -> Result<Self, AppError> {
        let model_path = &config.model_path;
        if !model_path.is_file() {
            return Err(AppError::ModelLoadError(format!(
                "No ONNX model found at {:?}",
                model_path
            )));
        }

        verify_artifact(model_path, config.model_sha256.as_deref())?;

        let num_threads = config.intra_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

        tracing::info!("Initializing ONNX Runtime session from {:?}...", model_path);
        let session = Session::builder()
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?
            .with_intra_threads(num_threads)
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?;

        let input_name = Self::resolve_name(
            config.input_name.as_deref(),
            session.inputs.iter().map(|i| i.name.as_str()),
            "input",
        )?;
        let output_name = Self::resolve_name(
            config.output_name.as_deref(),
            session.outputs.iter().map(|o| o.name.as_str()),
            "output",
        )?;

        let input_dim = session
            .inputs
            .iter()
            .find(|i| i.name == input_name)
            .and_then(|i| fixed_width(&i.input_type));
        let num_classes = session
            .outputs
            .iter()
            .find(|o| o.name == output_name)
            .and_then(|o| fixed_width(&o.output_type));

        tracing::info!(
            "ONNX Engine initialized: input={} (width {:?}), output={} (classes {:?}), intra_threads={}",
            input_name,
            input_dim,
            output_name,
            num_classes,
            num_threads
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            input_dim,
            num_classes,
        })
    }

    /// Picks the configured graph port, or the first one the model declares.
    fn resolve_name<'a>(
        configured: Option<&str>,
        mut available: impl Iterator<Item = &'a str>,
        kind: &str,
    ) -> Result<String, AppError> {
        match configured {
            Some(name) => {
                if available.any(|n| n == name) {
                    Ok(name.to_string())
                } else {
                    Err(AppError::ModelLoadError(format!(
                        "Model has no {} named {}",
                        kind, name
                    )))
                }
            }
            None => available.next().map(str::to_string).ok_or_else(|| {
                AppError::ModelLoadError(format!("Model declares no {}", kind))
            }),
        }
    }

    fn forward_pass(&self, features: &[f32]) -> Result<Vec<f32>, AppError> {
        if let Some(input_dim) = self.input_dim {
            validate_dimension(features, input_dim)?;
        }

        let input = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| AppError::InferenceError(e.to_string()))?;
        let input_tensor = Tensor::from_array(input.into_dyn())
            .map_err(|e| AppError::InferenceError(e.to_string()))?;

        let mut session_guard = self
            .session
            .lock()
            .map_err(|e| AppError::InferenceError(e.to_string()))?;
        let outputs = session_guard
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| AppError::InferenceError(e.to_string()))?;
        let scores = outputs[self.output_name.as_str()]
            .try_extract_array::<f32>()
            .map_err(|e| AppError::InferenceError(e.to_string()))?;
        tracing::debug!("ONNX model output shape: {:?}", scores.shape());

        Ok(scores.iter().copied().collect())
    }
}

/// Width of the last axis of a tensor port, when the model fixes it.
fn fixed_width(value_type: &ValueType) -> Option<usize> {
    match value_type {
        ValueType::Tensor { shape, .. } => last_fixed_dim(shape),
        _ => None,
    }
}

/// Dynamic axes are stored as -1.
fn last_fixed_dim(shape: &[i64]) -> Option<usize> {
    shape
        .last()
        .copied()
        .filter(|dim| *dim > 0)
        .map(|dim| dim as usize)
}

impl InferenceEngine for OnnxEngine {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, AppError> {
        self.forward_pass(features)
    }

    fn input_dim(&self) -> Option<usize> {
        self.input_dim
    }

    fn num_classes(&self) -> Option<usize> {
        self.num_classes
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}
