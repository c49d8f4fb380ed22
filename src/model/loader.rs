// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::AppError;
use crate::utils::hash::verify_sha256;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Reads a JSON artifact from disk. `what` names the artifact in error messages.
pub fn load_json_artifact<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    if !path.exists() {
        return Err(AppError::ModelLoadError(format!(
            "{} not found at {}",
            what,
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::ModelLoadError(format!(
            "Failed to parse {} at {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

pub fn verify_artifact(path: &Path, expected_sha256: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = expected_sha256 else {
        return Ok(());
    };

    info!("Verifying SHA256 of {}", path.display());
    if !verify_sha256(path, expected)? {
        return Err(AppError::ModelLoadError(format!(
            "SHA256 verification failed for {}. Expected: {}",
            path.display(),
            expected
        )));
    }
    info!("SHA256 verification passed");
    Ok(())
}
