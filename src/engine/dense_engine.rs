// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Feed-forward classifier evaluated in-process.
//!
//! Weights come from a JSON export of the dense layers of a trained model:
//!
//! ```json
//! {"layers": [
//!   {"weights": [[0.1, 0.2], ...], "bias": [0.0, 0.0], "activation": "relu"},
//!   {"weights": [[...]], "bias": [...], "activation": "softmax"}
//! ]}
//! ```
//!
//! `weights` is `[inputs][outputs]`, the same layout as a Keras `Dense` kernel.

use super::InferenceEngine;
use crate::config::model::ModelConfig;
use crate::error::AppError;
use crate::model::loader::{load_json_artifact, verify_artifact};
use crate::utils::{softmax, validate_dimension};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayerSpec {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseNetworkSpec {
    pub layers: Vec<DenseLayerSpec>,
}

struct DenseLayer {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        let mut output = input.dot(&self.weights) + &self.bias;
        match self.activation {
            Activation::Linear => {}
            Activation::Relu => output.mapv_inplace(|v| v.max(0.0)),
            Activation::Sigmoid => output.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => output.mapv_inplace(f32::tanh),
            Activation::Softmax => {
                if let Some(values) = output.as_slice_mut() {
                    softmax(values);
                }
            }
        }
        output
    }
}

pub struct DenseEngine {
    layers: Vec<DenseLayer>,
    input_dim: usize,
    num_classes: usize,
}

impl DenseEngine {
    pub fn new(config: &ModelConfig) -> Result<Self, AppError> {
        verify_artifact(&config.model_path, config.model_sha256.as_deref())?;
        let spec: DenseNetworkSpec = load_json_artifact(&config.model_path, "Dense model")?;
        let engine = Self::from_spec(spec)?;
        info!(
            "Dense engine initialized from {}: layers={}, input_dim={}, num_classes={}",
            config.model_path.display(),
            engine.layers.len(),
            engine.input_dim,
            engine.num_classes
        );
        Ok(engine)
    }

    pub fn from_spec(spec: DenseNetworkSpec) -> Result<Self, AppError> {
        if spec.layers.is_empty() {
            return Err(AppError::ModelLoadError(
                "Dense model has no layers".to_string(),
            ));
        }

        let mut layers = Vec::with_capacity(spec.layers.len());
        let mut expected_inputs: Option<usize> = None;

        for (idx, layer) in spec.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            let cols = layer.weights.first().map(Vec::len).unwrap_or(0);
            if rows == 0 || cols == 0 {
                return Err(AppError::ModelLoadError(format!(
                    "Layer {} has an empty weight matrix",
                    idx
                )));
            }
            if layer.weights.iter().any(|row| row.len() != cols) {
                return Err(AppError::ModelLoadError(format!(
                    "Layer {} has ragged weight rows",
                    idx
                )));
            }
            if layer.bias.len() != cols {
                return Err(AppError::ModelLoadError(format!(
                    "Layer {} bias has {} values, expected {}",
                    idx,
                    layer.bias.len(),
                    cols
                )));
            }
            if let Some(expected) = expected_inputs
                && rows != expected
            {
                return Err(AppError::ModelLoadError(format!(
                    "Layer {} takes {} inputs but the previous layer produces {}",
                    idx, rows, expected
                )));
            }
            expected_inputs = Some(cols);

            let flat: Vec<f32> = layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((rows, cols), flat)
                .map_err(|e| AppError::ModelLoadError(e.to_string()))?;

            layers.push(DenseLayer {
                weights,
                bias: Array1::from(layer.bias),
                activation: layer.activation,
            });
        }

        let input_dim = layers[0].weights.nrows();
        let num_classes = layers[layers.len() - 1].weights.ncols();

        Ok(Self {
            layers,
            input_dim,
            num_classes,
        })
    }

    fn forward_pass(&self, features: &[f32]) -> Result<Vec<f32>, AppError> {
        validate_dimension(features, self.input_dim)?;

        let mut activations = Array1::from(features.to_vec());
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        tracing::debug!("Dense model output: {:?}", activations);
        Ok(activations.to_vec())
    }
}

impl InferenceEngine for DenseEngine {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, AppError> {
        self.forward_pass(features)
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.input_dim)
    }

    fn num_classes(&self) -> Option<usize> {
        Some(self.num_classes)
    }

    fn name(&self) -> &'static str {
        "dense"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(weights: Vec<Vec<f32>>, bias: Vec<f32>, activation: Activation) -> DenseLayerSpec {
        DenseLayerSpec {
            weights,
            bias,
            activation,
        }
    }

    #[test]
    fn test_single_linear_layer() {
        let engine = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![layer(
                vec![vec![1.0, 0.0], vec![0.0, 2.0], vec![1.0, 1.0]],
                vec![0.5, -0.5],
                Activation::Linear,
            )],
        })
        .unwrap();

        assert_eq!(engine.input_dim(), Some(3));
        assert_eq!(engine.num_classes(), Some(2));

        let scores = engine.predict(&[1.0, 1.0, 0.0]).unwrap();
        assert!((scores[0] - 1.5).abs() < 1e-6);
        assert!((scores[1] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_relu_then_softmax() {
        let engine = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![
                layer(
                    vec![vec![1.0, -1.0], vec![1.0, -1.0]],
                    vec![0.0, 0.0],
                    Activation::Relu,
                ),
                layer(
                    vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
                    vec![0.0, 0.0, 0.0],
                    Activation::Softmax,
                ),
            ],
        })
        .unwrap();

        let scores = engine.predict(&[1.0, 1.0]).unwrap();
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(scores[0] > scores[1]);
        assert!((scores[1] - scores[2]).abs() < 1e-6);
    }

    #[test]
    fn test_sigmoid_and_tanh() {
        let engine = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![
                layer(vec![vec![0.0]], vec![0.0], Activation::Sigmoid),
                layer(vec![vec![0.0]], vec![0.0], Activation::Tanh),
            ],
        })
        .unwrap();
        let scores = engine.predict(&[3.0]).unwrap();
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_wrong_input_width() {
        let engine = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![layer(vec![vec![1.0], vec![1.0]], vec![0.0], Activation::Linear)],
        })
        .unwrap();
        let err = engine.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            AppError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_rejects_inconsistent_shapes() {
        let chained = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![
                layer(vec![vec![1.0, 1.0]], vec![0.0, 0.0], Activation::Relu),
                layer(vec![vec![1.0]], vec![0.0], Activation::Linear),
            ],
        });
        assert!(chained.is_err());

        let bad_bias = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![layer(vec![vec![1.0, 1.0]], vec![0.0], Activation::Linear)],
        });
        assert!(bad_bias.is_err());

        let ragged = DenseEngine::from_spec(DenseNetworkSpec {
            layers: vec![layer(
                vec![vec![1.0, 1.0], vec![1.0]],
                vec![0.0, 0.0],
                Activation::Linear,
            )],
        });
        assert!(ragged.is_err());

        let empty = DenseEngine::from_spec(DenseNetworkSpec { layers: vec![] });
        assert!(empty.is_err());
    }

    #[test]
    fn test_activation_defaults_to_linear() {
        let spec: DenseNetworkSpec =
            serde_json::from_str(r#"{"layers": [{"weights": [[2.0]], "bias": [1.0]}]}"#).unwrap();
        assert_eq!(spec.layers[0].activation, Activation::Linear);
        let engine = DenseEngine::from_spec(spec).unwrap();
        assert_eq!(engine.predict(&[2.0]).unwrap(), vec![5.0]);
    }
}
