//! Error types for Mindgauge

use thiserror::Error;

/// Errors that can occur while loading model artifacts or running a diagnosis
#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("No model artifact found: {0}")]
    ModelUnavailable(String),

    #[error("Feature contract mismatch: {0}")]
    ContractMismatch(String),

    #[error("Invalid answers: {0}")]
    Validation(#[from] crate::schema::ValidationError),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Artifact I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
