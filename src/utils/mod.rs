// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod constants;
pub mod hash;
pub mod vector;

pub use constants::DEFAULT_SYMPTOMS;
pub use hash::{compute_sha256, verify_sha256};
pub use vector::{argmax, softmax, validate_dimension};
