// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::AppConfig;
use crate::config::model::InputMode;
use crate::domain::{
    ModelMetadata, PredictOutcome, PredictRequest, PredictResponse, SymptomInput,
};
use crate::engine::{AnyEngine, InferenceEngine};
use crate::error::AppError;
use crate::model::{DiseaseInfoTable, LabelDecoder, SymptomVocabulary};
use crate::utils::{argmax, validate_dimension};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything needed to answer a prediction, loaded once and never mutated.
pub struct PredictionService {
    engine: Arc<dyn InferenceEngine>,
    vocabulary: SymptomVocabulary,
    decoder: LabelDecoder,
    disease_info: Option<DiseaseInfoTable>,
    input_mode: InputMode,
    loaded_at: DateTime<Utc>,
}

impl PredictionService {
    /// Checks that the engine, vocabulary and decoder agree on their sizes.
    pub fn new(
        engine: Arc<dyn InferenceEngine>,
        vocabulary: SymptomVocabulary,
        decoder: LabelDecoder,
        disease_info: Option<DiseaseInfoTable>,
    ) -> Result<Self, AppError> {
        if let Some(input_dim) = engine.input_dim()
            && input_dim != vocabulary.len()
        {
            return Err(AppError::ModelLoadError(format!(
                "Model expects {} features but the symptom vocabulary has {} entries",
                input_dim,
                vocabulary.len()
            )));
        }

        if let Some(num_classes) = engine.num_classes()
            && num_classes != decoder.len()
        {
            return Err(AppError::ModelLoadError(format!(
                "Model scores {} classes but the label encoder has {}",
                num_classes,
                decoder.len()
            )));
        }

        Ok(Self {
            engine,
            vocabulary,
            decoder,
            disease_info,
            input_mode: InputMode::default(),
            loaded_at: Utc::now(),
        })
    }

    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    /// Loads every artifact named in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let vocabulary = SymptomVocabulary::new(config.model.symptoms.iter().cloned())?;
        info!("Symptom vocabulary: {} entries", vocabulary.len());

        info!(
            "Loading {} model from {}",
            config.model.engine,
            config.model.model_path.display()
        );
        let engine: Arc<dyn InferenceEngine> = Arc::new(AnyEngine::new(&config.model)?);

        let decoder = LabelDecoder::load(&config.model.label_encoder_path)?;

        let disease_info = if config.enrichment.enabled {
            Some(DiseaseInfoTable::load(&config.enrichment.disease_info_path)?)
        } else {
            info!("Disease info enrichment disabled");
            None
        };

        let service = Self::new(engine, vocabulary, decoder, disease_info)?
            .with_input_mode(config.model.input_mode);

        if let Some(table) = &service.disease_info {
            let missing = service
                .decoder
                .classes()
                .iter()
                .filter(|class| table.get(class).is_none())
                .count();
            if missing > 0 {
                warn!(
                    "{} of {} classes have no disease info entry",
                    missing,
                    service.decoder.len()
                );
            }
        }

        Ok(service)
    }

    /// Turns the request input into the model's feature vector.
    pub fn build_features(&self, input: &SymptomInput) -> Result<Vec<f32>, AppError> {
        match input {
            SymptomInput::Names(names) => {
                if !self.input_mode.accepts_names() {
                    return Err(AppError::InvalidInput(
                        "`symptoms` must be an array of numbers".to_string(),
                    ));
                }
                let unknown = self.vocabulary.unknown(names);
                if !unknown.is_empty() {
                    debug!("Ignoring unknown symptoms: {:?}", unknown);
                }
                Ok(self.vocabulary.encode(names))
            }
            SymptomInput::Vector(values) => {
                if !self.input_mode.accepts_vector() {
                    return Err(AppError::InvalidInput(
                        "`symptoms` must be an array of symptom names".to_string(),
                    ));
                }
                validate_dimension(values, self.vocabulary.len())?;
                Ok(values.clone())
            }
        }
    }

    pub fn predict(&self, input: &SymptomInput) -> Result<PredictResponse, AppError> {
        let features = self.build_features(input)?;

        let scores = self.engine.predict(&features)?;
        let index = argmax(&scores).ok_or_else(|| {
            AppError::InferenceError("Model returned no usable scores".to_string())
        })?;
        let predicted_disease = self.decoder.decode(index)?.to_string();

        debug!(
            "Predicted {} (class {}, {} scores)",
            predicted_disease,
            index,
            scores.len()
        );

        let info = self
            .disease_info
            .as_ref()
            .map(|table| table.lookup(&predicted_disease));

        Ok(PredictResponse {
            predicted_disease,
            info,
        })
    }

    /// Envelope form of [`predict`](Self::predict): failures become an `error` payload.
    pub fn handle(&self, request: &PredictRequest) -> PredictOutcome {
        match self.predict(&request.symptoms) {
            Ok(response) => PredictOutcome::Success(response),
            Err(e) => {
                warn!("Prediction failed: {}", e);
                PredictOutcome::failure(e)
            }
        }
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn decoder(&self) -> &LabelDecoder {
        &self.decoder
    }

    pub fn enrichment_enabled(&self) -> bool {
        self.disease_info.is_some()
    }

    pub fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            engine: self.engine.name().to_string(),
            input_dim: self.vocabulary.len(),
            classes: self.decoder.classes().to_vec(),
            input_mode: self.input_mode.to_string(),
            enrichment_enabled: self.enrichment_enabled(),
            loaded_at: self.loaded_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiseaseInfo;

    /// Scores class `i` with the value of feature `i`, so the first present
    /// symptom wins.
    struct EchoEngine;

    impl InferenceEngine for EchoEngine {
        fn predict(&self, features: &[f32]) -> Result<Vec<f32>, AppError> {
            Ok(features.to_vec())
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    struct FailingEngine;

    impl InferenceEngine for FailingEngine {
        fn predict(&self, _features: &[f32]) -> Result<Vec<f32>, AppError> {
            Err(AppError::InferenceError("session crashed".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct SizedEngine {
        input_dim: usize,
        num_classes: usize,
    }

    impl InferenceEngine for SizedEngine {
        fn predict(&self, _features: &[f32]) -> Result<Vec<f32>, AppError> {
            Ok(vec![0.0; self.num_classes])
        }

        fn input_dim(&self) -> Option<usize> {
            Some(self.input_dim)
        }

        fn num_classes(&self) -> Option<usize> {
            Some(self.num_classes)
        }

        fn name(&self) -> &'static str {
            "sized"
        }
    }

    fn vocabulary() -> SymptomVocabulary {
        SymptomVocabulary::new(["Fever", "Cough", "Sneezing"]).unwrap()
    }

    fn decoder() -> LabelDecoder {
        LabelDecoder::from_classes(vec![
            "Malaria".to_string(),
            "Bronchitis".to_string(),
            "Common Cold".to_string(),
        ])
        .unwrap()
    }

    fn table() -> DiseaseInfoTable {
        DiseaseInfoTable::from_entries([(
            "common_cold",
            DiseaseInfo {
                overview: "Viral infection of the nose and throat.".to_string(),
                causes: vec!["Rhinovirus".to_string()],
                symptoms: vec!["Sneezing".to_string()],
                next_steps: vec!["Rest".to_string()],
            },
        )])
        .unwrap()
    }

    fn service(engine: Arc<dyn InferenceEngine>, info: Option<DiseaseInfoTable>) -> PredictionService {
        PredictionService::new(engine, vocabulary(), decoder(), info).unwrap()
    }

    fn names(values: &[&str]) -> SymptomInput {
        SymptomInput::Names(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_predict_decodes_argmax() {
        let svc = service(Arc::new(EchoEngine), None);
        let res = svc.predict(&names(&["Cough"])).unwrap();
        assert_eq!(res.predicted_disease, "Bronchitis");
        assert!(res.info.is_none());
    }

    #[test]
    fn test_predict_enriches_with_normalized_label() {
        let svc = service(Arc::new(EchoEngine), Some(table()));
        let res = svc.predict(&names(&["Sneezing"])).unwrap();
        assert_eq!(res.predicted_disease, "Common Cold");
        let info = res.info.unwrap();
        assert_eq!(info.overview, "Viral infection of the nose and throat.");
        assert_eq!(info.next_steps, vec!["Rest"]);
    }

    #[test]
    fn test_predict_unknown_label_yields_empty_info() {
        let svc = service(Arc::new(EchoEngine), Some(table()));
        let res = svc.predict(&names(&["Fever"])).unwrap();
        assert_eq!(res.predicted_disease, "Malaria");
        assert_eq!(res.info, Some(DiseaseInfo::default()));
    }

    #[test]
    fn test_raw_vector_input() {
        let svc = service(Arc::new(EchoEngine), None);
        let res = svc
            .predict(&SymptomInput::Vector(vec![0.0, 0.0, 1.0]))
            .unwrap();
        assert_eq!(res.predicted_disease, "Common Cold");
    }

    #[test]
    fn test_raw_vector_wrong_length() {
        let svc = service(Arc::new(EchoEngine), None);
        let err = svc
            .predict(&SymptomInput::Vector(vec![1.0, 0.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_input_mode_restricts_shapes() {
        let names_only = service(Arc::new(EchoEngine), None).with_input_mode(InputMode::Names);
        assert!(matches!(
            names_only.predict(&SymptomInput::Vector(vec![1.0, 0.0, 0.0])),
            Err(AppError::InvalidInput(_))
        ));
        assert!(names_only.predict(&names(&["Fever"])).is_ok());

        let vector_only = service(Arc::new(EchoEngine), None).with_input_mode(InputMode::Vector);
        assert!(matches!(
            vector_only.predict(&names(&["Fever"])),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_all_zero_scores_pick_first_class() {
        let svc = service(Arc::new(EchoEngine), None);
        let res = svc.predict(&names(&[])).unwrap();
        assert_eq!(res.predicted_disease, "Malaria");
    }

    #[test]
    fn test_handle_wraps_failures() {
        let svc = service(Arc::new(FailingEngine), None);
        let outcome = svc.handle(&PredictRequest {
            symptoms: names(&["Fever"]),
        });
        assert_eq!(
            outcome,
            PredictOutcome::failure("Inference error: session crashed")
        );
    }

    #[test]
    fn test_score_outside_decoder_is_decode_error() {
        struct WideEngine;
        impl InferenceEngine for WideEngine {
            fn predict(&self, _features: &[f32]) -> Result<Vec<f32>, AppError> {
                Ok(vec![0.0, 0.0, 0.0, 0.0, 1.0])
            }
            fn name(&self) -> &'static str {
                "wide"
            }
        }

        let svc = service(Arc::new(WideEngine), None);
        let err = svc.predict(&names(&["Fever"])).unwrap_err();
        assert!(matches!(err, AppError::DecodeError(_)));
    }

    #[test]
    fn test_new_rejects_mismatched_sizes() {
        let wrong_input = PredictionService::new(
            Arc::new(SizedEngine {
                input_dim: 4,
                num_classes: 3,
            }),
            vocabulary(),
            decoder(),
            None,
        );
        assert!(wrong_input.is_err());

        let wrong_classes = PredictionService::new(
            Arc::new(SizedEngine {
                input_dim: 3,
                num_classes: 2,
            }),
            vocabulary(),
            decoder(),
            None,
        );
        assert!(wrong_classes.is_err());
    }

    #[test]
    fn test_metadata() {
        let svc = service(Arc::new(EchoEngine), Some(table()));
        let meta = svc.metadata();
        assert_eq!(meta.engine, "echo");
        assert_eq!(meta.input_dim, 3);
        assert_eq!(meta.classes.len(), 3);
        assert_eq!(meta.input_mode, "both");
        assert!(meta.enrichment_enabled);
        assert!(DateTime::parse_from_rfc3339(&meta.loaded_at).is_ok());
    }
}
