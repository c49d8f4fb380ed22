// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::constants::{
    DEFAULT_LABEL_ENCODER_PATH, DEFAULT_MODEL_PATH, DEFAULT_SYMPTOMS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    #[default]
    Onnx,
    Dense,
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineType::Onnx => write!(f, "onnx"),
            EngineType::Dense => write!(f, "dense"),
        }
    }
}

/// Which request shapes `/predict` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// A list of symptom names, encoded against the vocabulary.
    Names,
    /// A pre-encoded feature vector.
    Vector,
    #[default]
    Both,
}

impl InputMode {
    pub fn accepts_names(&self) -> bool {
        matches!(self, InputMode::Names | InputMode::Both)
    }

    pub fn accepts_vector(&self) -> bool {
        matches!(self, InputMode::Vector | InputMode::Both)
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Names => write!(f, "names"),
            InputMode::Vector => write!(f, "vector"),
            InputMode::Both => write!(f, "both"),
        }
    }
}

fn default_symptoms() -> Vec<String> {
    DEFAULT_SYMPTOMS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub engine: EngineType,
    pub model_path: PathBuf,
    pub label_encoder_path: PathBuf,
    #[serde(default)]
    pub model_sha256: Option<String>,
    /// Graph input to feed; the first declared input when unset.
    #[serde(default)]
    pub input_name: Option<String>,
    /// Graph output to read; the first declared output when unset.
    #[serde(default)]
    pub output_name: Option<String>,
    #[serde(default)]
    pub intra_threads: Option<usize>,
    #[serde(default)]
    pub input_mode: InputMode,
    /// Symptom names in training order.
    #[serde(default = "default_symptoms")]
    pub symptoms: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            engine: EngineType::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            label_encoder_path: PathBuf::from(DEFAULT_LABEL_ENCODER_PATH),
            model_sha256: None,
            input_name: None,
            output_name: None,
            intra_threads: None,
            input_mode: InputMode::default(),
            symptoms: default_symptoms(),
        }
    }
}
