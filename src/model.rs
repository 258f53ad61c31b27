//! Classifier adapter
//!
//! Wraps the trained binary classifier behind the [`Classifier`] seam. The
//! bundled implementation is a standard-scaled logistic regression loaded from
//! a JSON artifact exported by the training pipeline, matching the model the
//! service was trained with. The adapter publishes the ordered feature
//! contract; the contract is checked against the known feature set at load
//! time so a stale or foreign artifact fails fast instead of mis-scoring
//! requests.

use crate::error::DiagnosisError;
use crate::types::{Feature, FeatureVector, PredictionResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Artifact filenames tried in order when loading from a models directory
pub const ARTIFACT_CANDIDATES: &[&str] = &[
    "mental_health_model.json",
    "logistic_regression_model.json",
    "logistic_regression_optimized.json",
];

/// A fitted binary classifier plus its feature contract
pub trait Classifier: Send + Sync {
    /// The exact ordered feature list the model expects
    fn feature_order(&self) -> &[Feature];

    /// Predict class and positive-class probability for one vector
    fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, DiagnosisError>;

    /// Summary of the loaded model for diagnostics
    fn info(&self) -> ModelInfo;
}

/// Standard-scaler parameters, one entry per feature column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Training-time metrics carried alongside the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f1_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_samples: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_samples: Option<u64>,
}

/// On-disk model artifact: feature contract, scaler, and regression weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Ordered column names the scaler and coefficients are indexed by
    pub feature_columns: Vec<String>,
    pub scaler: ScalerParams,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

/// Model summary exposed for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub num_features: usize,
    pub feature_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

/// Logistic regression over standard-scaled features
#[derive(Debug)]
pub struct LinearModel {
    contract: Vec<Feature>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
    metadata: Option<ModelMetadata>,
}

impl LinearModel {
    /// Load the first artifact found among [`ARTIFACT_CANDIDATES`] in the
    /// given directory. No artifact is fatal: the caller must refuse to serve.
    pub fn load(models_dir: &Path) -> Result<Self, DiagnosisError> {
        for candidate in ARTIFACT_CANDIDATES {
            let path = models_dir.join(candidate);
            if !path.exists() {
                continue;
            }
            let contents = std::fs::read_to_string(&path)?;
            let artifact: ModelArtifact = serde_json::from_str(&contents)?;
            let model = Self::from_artifact(artifact)?;
            info!(file = %path.display(), features = model.contract.len(), "loaded model artifact");
            return Ok(model);
        }

        Err(DiagnosisError::ModelUnavailable(format!(
            "none of {:?} found in {}",
            ARTIFACT_CANDIDATES,
            models_dir.display()
        )))
    }

    /// Build a model from a parsed artifact, validating the feature contract
    /// and parameter shapes up front.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, DiagnosisError> {
        let mut contract = Vec::with_capacity(artifact.feature_columns.len());
        let mut seen = HashSet::new();
        for column in &artifact.feature_columns {
            let feature = Feature::from_column_name(column).ok_or_else(|| {
                DiagnosisError::ContractMismatch(format!("unknown feature column \"{column}\""))
            })?;
            if !seen.insert(feature) {
                return Err(DiagnosisError::ContractMismatch(format!(
                    "duplicate feature column \"{column}\""
                )));
            }
            contract.push(feature);
        }

        let n = contract.len();
        if n == 0 {
            return Err(DiagnosisError::ContractMismatch(
                "artifact declares no feature columns".to_string(),
            ));
        }
        for (name, len) in [
            ("scaler.mean", artifact.scaler.mean.len()),
            ("scaler.scale", artifact.scaler.scale.len()),
            ("coefficients", artifact.coefficients.len()),
        ] {
            if len != n {
                return Err(DiagnosisError::ContractMismatch(format!(
                    "{name} has {len} entries but the contract declares {n} features"
                )));
            }
        }
        if artifact.scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(DiagnosisError::ContractMismatch(
                "scaler.scale contains zero or non-finite entries".to_string(),
            ));
        }

        Ok(Self {
            contract,
            mean: artifact.scaler.mean,
            scale: artifact.scaler.scale,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            metadata: artifact.metadata,
        })
    }
}

impl Classifier for LinearModel {
    fn feature_order(&self) -> &[Feature] {
        &self.contract
    }

    fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, DiagnosisError> {
        let values = vector.ordered(&self.contract);
        if values.len() != self.coefficients.len() {
            return Err(DiagnosisError::Prediction(format!(
                "vector has {} features but the model expects {}",
                values.len(),
                self.coefficients.len()
            )));
        }

        let mut logit = self.intercept;
        for (i, value) in values.iter().enumerate() {
            let scaled = (value - self.mean[i]) / self.scale[i];
            logit += scaled * self.coefficients[i];
        }

        let probability = sigmoid(logit);
        if !probability.is_finite() {
            return Err(DiagnosisError::Prediction(format!(
                "non-finite probability from logit {logit}"
            )));
        }

        Ok(PredictionResult {
            prediction: u8::from(probability >= 0.5),
            probability,
        })
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            num_features: self.contract.len(),
            feature_columns: self
                .contract
                .iter()
                .map(|f| f.column_name().to_string())
                .collect(),
            metadata: self.metadata.clone(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_artifact() -> ModelArtifact {
        ModelArtifact {
            feature_columns: vec!["Age".to_string(), "Risk_Score".to_string()],
            scaler: ScalerParams {
                mean: vec![20.0, 1.0],
                scale: vec![5.0, 1.0],
            },
            coefficients: vec![0.0, 1.0],
            intercept: 0.0,
            metadata: Some(ModelMetadata {
                model_name: Some("logistic_regression".to_string()),
                accuracy: Some(0.84),
                ..Default::default()
            }),
        }
    }

    fn make_test_vector() -> FeatureVector {
        FeatureVector {
            age: 25.0,
            academic_pressure: 0.0,
            work_pressure: 0.0,
            cgpa: 0.0,
            study_satisfaction: 0.0,
            job_satisfaction: 0.0,
            work_study_hours: 0.0,
            financial_stress: 0.0,
            sleep_hours: 0.0,
            diet_score: 0.0,
            risk_score: 1.5,
            gender_encoded: 0.0,
            profession_encoded: 0.0,
            suicidal_thoughts_encoded: 0.0,
            family_history_encoded: 0.0,
        }
    }

    #[test]
    fn test_predict_matches_hand_computation() {
        let model = LinearModel::from_artifact(make_test_artifact()).unwrap();
        let result = model.predict(&make_test_vector()).unwrap();

        // age scales to 1.0 with weight 0, risk scales to 0.5 with weight 1
        // sigmoid(0.5) = 0.6224593...
        assert!((result.probability - 0.622_459_3).abs() < 1e-6);
        assert_eq!(result.prediction, 1);
    }

    #[test]
    fn test_negative_logit_predicts_zero() {
        let mut artifact = make_test_artifact();
        artifact.intercept = -2.0;
        let model = LinearModel::from_artifact(artifact).unwrap();

        let result = model.predict(&make_test_vector()).unwrap();
        assert_eq!(result.prediction, 0);
        assert!(result.probability < 0.5);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let mut artifact = make_test_artifact();
        artifact.feature_columns[1] = "Shoe Size".to_string();

        match LinearModel::from_artifact(artifact) {
            Err(DiagnosisError::ContractMismatch(msg)) => assert!(msg.contains("Shoe Size")),
            other => panic!("expected ContractMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut artifact = make_test_artifact();
        artifact.feature_columns[1] = "Age".to_string();
        assert!(matches!(
            LinearModel::from_artifact(artifact),
            Err(DiagnosisError::ContractMismatch(_))
        ));
    }

    #[test]
    fn test_wrong_scaler_length_rejected() {
        let mut artifact = make_test_artifact();
        artifact.scaler.scale.push(1.0);
        assert!(matches!(
            LinearModel::from_artifact(artifact),
            Err(DiagnosisError::ContractMismatch(_))
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut artifact = make_test_artifact();
        artifact.scaler.scale[0] = 0.0;
        assert!(matches!(
            LinearModel::from_artifact(artifact),
            Err(DiagnosisError::ContractMismatch(_))
        ));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logistic_regression_model.json");
        std::fs::write(&path, serde_json::to_string(&make_test_artifact()).unwrap()).unwrap();

        let model = LinearModel::load(dir.path()).unwrap();
        assert_eq!(model.feature_order(), &[Feature::Age, Feature::RiskScore]);

        let model_info = model.info();
        assert_eq!(model_info.num_features, 2);
        assert_eq!(model_info.feature_columns, vec!["Age", "Risk_Score"]);
        assert_eq!(
            model_info.metadata.unwrap().model_name.as_deref(),
            Some("logistic_regression")
        );
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            LinearModel::load(dir.path()),
            Err(DiagnosisError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_candidate_order_prefers_first_match() {
        let dir = tempfile::tempdir().unwrap();

        let mut preferred = make_test_artifact();
        preferred.intercept = 1.0;
        let mut fallback = make_test_artifact();
        fallback.intercept = -1.0;

        std::fs::write(
            dir.path().join("mental_health_model.json"),
            serde_json::to_string(&preferred).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("logistic_regression_model.json"),
            serde_json::to_string(&fallback).unwrap(),
        )
        .unwrap();

        let model = LinearModel::load(dir.path()).unwrap();
        // The preferred artifact's intercept shifts the probability up
        let result = model.predict(&make_test_vector()).unwrap();
        assert!(result.probability > 0.6);
    }

    #[test]
    fn test_sigmoid_extremes() {
        assert!(sigmoid(0.0) - 0.5 < 1e-12);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
    }
}
