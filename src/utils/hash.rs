// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::AppError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn compute_sha256<P: AsRef<Path>>(file_path: P) -> Result<String, AppError> {
    let path = file_path.as_ref();

    let mut file = File::open(path)
        .map_err(|e| AppError::ModelLoadError(format!("Failed to open file {:?}: {}", path, e)))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| {
            AppError::ModelLoadError(format!("Failed to read file {:?}: {}", path, e))
        })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn verify_sha256<P: AsRef<Path>>(file_path: P, expected_hash: &str) -> Result<bool, AppError> {
    let actual_hash = compute_sha256(file_path)?;
    Ok(expected_hash.trim().eq_ignore_ascii_case(&actual_hash))
}
