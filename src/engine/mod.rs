// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod dense_engine;

#[cfg(feature = "onnx")]
pub mod onnx_engine;

use crate::config::model::{EngineType, ModelConfig};
use crate::error::AppError;

/// 推理引擎抽象接口
pub trait InferenceEngine: Send + Sync {
    /// One sample in, one score per class out.
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, AppError>;

    /// Feature width the model expects, when the engine can tell.
    fn input_dim(&self) -> Option<usize> {
        None
    }

    /// Number of classes the model scores, when the engine can tell.
    fn num_classes(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> &'static str;
}

pub enum AnyEngine {
    Dense(dense_engine::DenseEngine),
    #[cfg(feature = "onnx")]
    Onnx(onnx_engine::OnnxEngine),
}

impl AnyEngine {
    pub fn new(config: &ModelConfig) -> Result<Self, AppError> {
        match config.engine {
            EngineType::Dense => Ok(AnyEngine::Dense(dense_engine::DenseEngine::new(config)?)),
            #[cfg(feature = "onnx")]
            EngineType::Onnx => Ok(AnyEngine::Onnx(onnx_engine::OnnxEngine::new(config)?)),
            #[cfg(not(feature = "onnx"))]
            EngineType::Onnx => Err(AppError::ModelLoadError(
                "ONNX engine requested but this build has no `onnx` feature".to_string(),
            )),
        }
    }
}

impl InferenceEngine for AnyEngine {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, AppError> {
        match self {
            AnyEngine::Dense(engine) => engine.predict(features),
            #[cfg(feature = "onnx")]
            AnyEngine::Onnx(engine) => engine.predict(features),
        }
    }

    fn input_dim(&self) -> Option<usize> {
        match self {
            AnyEngine::Dense(engine) => engine.input_dim(),
            #[cfg(feature = "onnx")]
            AnyEngine::Onnx(engine) => engine.input_dim(),
        }
    }

    fn num_classes(&self) -> Option<usize> {
        match self {
            AnyEngine::Dense(engine) => engine.num_classes(),
            #[cfg(feature = "onnx")]
            AnyEngine::Onnx(engine) => engine.num_classes(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnyEngine::Dense(engine) => engine.name(),
            #[cfg(feature = "onnx")]
            AnyEngine::Onnx(engine) => engine.name(),
        }
    }
}
