// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod disease_info;
pub mod label_encoder;
pub mod loader;
pub mod vocabulary;

pub use disease_info::{DiseaseInfoTable, normalize_key};
pub use label_encoder::LabelDecoder;
pub use vocabulary::SymptomVocabulary;
