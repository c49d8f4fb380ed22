// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::loader::load_json_artifact;
use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// On-disk layouts accepted for the label encoder: a bare array of class
/// names in index order, or an object carrying `classes`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelEncoderFile {
    Classes(Vec<String>),
    Object { classes: Vec<String> },
}

impl LabelEncoderFile {
    fn into_classes(self) -> Vec<String> {
        match self {
            LabelEncoderFile::Classes(classes) => classes,
            LabelEncoderFile::Object { classes } => classes,
        }
    }
}

/// Maps a class index produced by the model back to a disease name.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn from_classes(classes: Vec<String>) -> Result<Self, AppError> {
        if classes.is_empty() {
            return Err(AppError::ModelLoadError(
                "Label encoder has no classes".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(classes.len());
        for class in &classes {
            if class.trim().is_empty() {
                return Err(AppError::ModelLoadError(
                    "Label encoder contains a blank class name".to_string(),
                ));
            }
            if !seen.insert(class.as_str()) {
                return Err(AppError::ModelLoadError(format!(
                    "Duplicate class in label encoder: {}",
                    class
                )));
            }
        }

        Ok(Self { classes })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file: LabelEncoderFile = load_json_artifact(path, "Label encoder")?;
        let decoder = Self::from_classes(file.into_classes())?;
        info!(
            "Loaded label encoder from {} ({} classes)",
            path.display(),
            decoder.len()
        );
        Ok(decoder)
    }

    pub fn decode(&self, index: usize) -> Result<&str, AppError> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            AppError::DecodeError(format!(
                "class index {} is outside the label encoder ({} classes)",
                index,
                self.classes.len()
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
