//! Pipeline orchestration
//!
//! This module provides the public API for Mindgauge. It wires the feature
//! mapper, classifier, risk analyzer, recommender, and assembler into a single
//! diagnosis call.
//!
//! The engine is constructed once at startup and injected wherever requests
//! are handled; there is no ambient global state. All per-request structures
//! are request-local, so one engine can be shared across threads freely.

use crate::error::DiagnosisError;
use crate::mapper::FeatureMapper;
use crate::model::{Classifier, LinearModel, ModelInfo};
use crate::recommend::Recommender;
use crate::report::ReportAssembler;
use crate::risk::RiskAnalyzer;
use crate::schema::RawAnswers;
use crate::types::DiagnosisRecord;
use std::path::Path;
use tracing::info;

/// Diagnosis engine owning the model and per-process metadata.
///
/// Pipeline stages:
/// 1. Validation - reject out-of-range or unrecognized answers
/// 2. FeatureMapper - engineer the feature vector
/// 3. Classifier - scale and predict
/// 4. RiskAnalyzer - evaluate threshold rules
/// 5. Recommender - band + factor advice
/// 6. ReportAssembler - final record
pub struct DiagnosisEngine {
    classifier: Box<dyn Classifier>,
    assembler: ReportAssembler,
}

impl DiagnosisEngine {
    /// Create an engine around an already-loaded classifier
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self {
            classifier,
            assembler: ReportAssembler::new(),
        }
    }

    /// Load the model artifact from a directory and build the engine.
    ///
    /// A missing or malformed artifact is fatal: callers must not serve
    /// traffic without a model.
    pub fn from_models_dir(models_dir: &Path) -> Result<Self, DiagnosisError> {
        let model = LinearModel::load(models_dir)?;
        Ok(Self::new(Box::new(model)))
    }

    /// Run one full diagnosis cycle on validated answers.
    ///
    /// Validation errors and prediction errors surface to the caller; the
    /// derived stages (risk score, rules, recommendations) degrade to
    /// defaults rather than failing the request.
    pub fn diagnose(&self, raw: &RawAnswers) -> Result<DiagnosisRecord, DiagnosisError> {
        raw.validate()?;

        let vector = FeatureMapper::map(raw);
        let prediction = self.classifier.predict(&vector)?;
        let risk_factors = RiskAnalyzer::analyze(raw);
        let recommendations = Recommender::recommend(prediction.probability, &risk_factors);

        let record = self.assembler.assemble(prediction, risk_factors, recommendations);
        info!(
            prediction = record.prediction,
            probability = record.probability,
            factors = record.risk_factors.len(),
            "diagnosis completed"
        );
        Ok(record)
    }

    /// JSON-in, JSON-out convenience wrapper for service layers
    pub fn diagnose_json(&self, raw_json: &str) -> Result<String, DiagnosisError> {
        let raw: RawAnswers = serde_json::from_str(raw_json)?;
        let record = self.diagnose(&raw)?;
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Summary of the loaded model
    pub fn model_info(&self) -> ModelInfo {
        self.classifier.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelArtifact, ScalerParams};
    use crate::schema::{DietaryHabits, Gender, Profession, SleepDuration, YesNo};
    use crate::types::{Confidence, Feature, Impact, RiskLevel};

    /// Identity-scaled model over the full contract, driven by the composite
    /// risk score alone so scenario probabilities are easy to reason about.
    fn make_test_engine() -> DiagnosisEngine {
        let mut coefficients = vec![0.0; Feature::ALL.len()];
        let risk_index = Feature::ALL
            .iter()
            .position(|f| *f == Feature::RiskScore)
            .unwrap();
        coefficients[risk_index] = 2.0;

        let artifact = ModelArtifact {
            feature_columns: Feature::ALL.iter().map(|f| f.column_name().to_string()).collect(),
            scaler: ScalerParams {
                mean: vec![0.0; Feature::ALL.len()],
                scale: vec![1.0; Feature::ALL.len()],
            },
            coefficients,
            intercept: -2.0,
            metadata: None,
        };
        let model = LinearModel::from_artifact(artifact).unwrap();
        DiagnosisEngine::new(Box::new(model))
    }

    fn make_distressed_answers() -> RawAnswers {
        RawAnswers {
            age: 22.0,
            gender: Gender::Male,
            academic_pressure: 5.0,
            work_pressure: 3.0,
            cgpa: 7.0,
            study_satisfaction: 3.0,
            job_satisfaction: 0.0,
            work_study_hours: 10.0,
            financial_stress: 5.0,
            sleep_duration: SleepDuration::LessThanFiveHours,
            dietary_habits: DietaryHabits::Unhealthy,
            suicidal_thoughts: YesNo::Yes,
            family_history: YesNo::Yes,
            city: "Mumbai".to_string(),
            profession: Profession::Student,
            degree: "M.Tech".to_string(),
        }
    }

    fn make_calm_answers() -> RawAnswers {
        RawAnswers {
            age: 24.0,
            gender: Gender::Female,
            academic_pressure: 2.0,
            work_pressure: 1.0,
            cgpa: 8.5,
            study_satisfaction: 4.0,
            job_satisfaction: 0.0,
            work_study_hours: 5.0,
            financial_stress: 1.0,
            sleep_duration: SleepDuration::SevenToEightHours,
            dietary_habits: DietaryHabits::Healthy,
            suicidal_thoughts: YesNo::No,
            family_history: YesNo::No,
            city: "Chennai".to_string(),
            profession: Profession::Student,
            degree: "B.A".to_string(),
        }
    }

    #[test]
    fn test_distressed_scenario_end_to_end() {
        let engine = make_test_engine();
        let record = engine.diagnose(&make_distressed_answers()).unwrap();

        // risk score 2.8, logit = 2*2.8 - 2 = 3.6, sigmoid(3.6) ~ 0.973
        assert_eq!(record.prediction, 1);
        assert!((record.probability - 0.973_403).abs() < 1e-3);
        assert_eq!(record.risk_level, RiskLevel::High);
        assert_eq!(record.confidence, Confidence::High);

        let names: Vec<&str> = record.risk_factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "High Academic Pressure",
                "High Financial Stress",
                "Insufficient Sleep",
                "Unhealthy Diet",
                "History of Suicidal Thoughts",
                "Family History of Mental Illness",
            ]
        );
        assert_eq!(record.risk_factors[4].impact, Impact::Critical);

        assert!(record.recommendations.len() <= 10);
        assert!(record.recommendations[0].contains("immediate professional help"));
    }

    #[test]
    fn test_calm_scenario_end_to_end() {
        let engine = make_test_engine();
        let record = engine.diagnose(&make_calm_answers()).unwrap();

        // risk score: 0.2*2 + 0.2*1 + 0.1*(5-7.5) + 0.1*(4-3) = 0.45
        // logit = 2*0.45 - 2 = -1.1, sigmoid ~ 0.25
        assert_eq!(record.prediction, 0);
        assert!(record.probability < 0.4);
        assert_eq!(record.risk_level, RiskLevel::Low);
        assert!(record.risk_factors.is_empty());
        assert!(record.recommendations[0].contains("good mental health practices"));
    }

    #[test]
    fn test_validation_rejects_before_prediction() {
        let engine = make_test_engine();
        let mut answers = make_calm_answers();
        answers.academic_pressure = 0.0;

        assert!(matches!(
            engine.diagnose(&answers),
            Err(DiagnosisError::Validation(_))
        ));
    }

    #[test]
    fn test_diagnose_is_deterministic_apart_from_timestamp() {
        let engine = make_test_engine();
        let answers = make_distressed_answers();

        let first = engine.diagnose(&answers).unwrap();
        let second = engine.diagnose(&answers).unwrap();

        assert_eq!(first.prediction, second.prediction);
        assert!((first.probability - second.probability).abs() < f64::EPSILON);
        assert_eq!(first.risk_factors, second.risk_factors);
        assert_eq!(first.recommendations, second.recommendations);
    }

    #[test]
    fn test_diagnose_json_round_trip() {
        let engine = make_test_engine();
        let raw_json = serde_json::to_string(&make_calm_answers()).unwrap();

        let record_json = engine.diagnose_json(&raw_json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&record_json).unwrap();

        assert_eq!(value["prediction"], 0);
        assert_eq!(value["risk_level"], "Low");
        assert!(value["recommendations"].as_array().unwrap().len() <= 10);
    }

    #[test]
    fn test_diagnose_json_rejects_malformed_input() {
        let engine = make_test_engine();
        assert!(matches!(
            engine.diagnose_json("not valid json"),
            Err(DiagnosisError::JsonError(_))
        ));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagnosisEngine>();
    }

    #[test]
    fn test_model_info_reflects_contract() {
        let engine = make_test_engine();
        let model_info = engine.model_info();
        assert_eq!(model_info.num_features, 15);
        assert_eq!(model_info.feature_columns[0], "Age");
    }
}
