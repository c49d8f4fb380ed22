// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::AppError;
use std::collections::{HashMap, HashSet};

/// Ordered symptom names. Position `i` is feature `i` of the model input.
#[derive(Debug, Clone)]
pub struct SymptomVocabulary {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SymptomVocabulary {
    pub fn new<I, S>(names: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(AppError::ModelLoadError(
                "Symptom vocabulary is empty".to_string(),
            ));
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(AppError::ModelLoadError(format!(
                    "Symptom vocabulary entry {} is blank",
                    idx
                )));
            }
            if positions.insert(name.clone(), idx).is_some() {
                return Err(AppError::ModelLoadError(format!(
                    "Duplicate symptom in vocabulary: {}",
                    name
                )));
            }
        }

        Ok(Self { names, positions })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Builds the 0/1 feature vector for a set of symptom names.
    ///
    /// Order and duplicates in `symptoms` do not matter; names outside the
    /// vocabulary are ignored.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<f32> {
        let present: HashSet<&str> = symptoms.iter().map(|s| s.as_ref()).collect();
        self.names
            .iter()
            .map(|name| if present.contains(name.as_str()) { 1.0 } else { 0.0 })
            .collect()
    }

    /// Names from `symptoms` that are not part of the vocabulary.
    pub fn unknown<'a, S: AsRef<str>>(&self, symptoms: &'a [S]) -> Vec<&'a str> {
        symptoms
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !self.positions.contains_key(*s))
            .collect()
    }
}
