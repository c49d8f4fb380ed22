// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Symptom names in the column order the reference model was trained on.
pub const DEFAULT_SYMPTOMS: [&str; 10] = [
    "Fever",
    "Chills",
    "Headache",
    "Muscle Pain",
    "Nausea",
    "Vomiting",
    "Fatigue",
    "Diarrhoea",
    "Phlegm",
    "Throat Irritation",
];

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MODEL_PATH: &str = "models/disease_prediction_model.onnx";
pub const DEFAULT_LABEL_ENCODER_PATH: &str = "models/label_encoder.json";
pub const DEFAULT_DISEASE_INFO_PATH: &str = "data/disease_info.json";
