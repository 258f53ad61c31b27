//! Mindgauge - depression-risk scoring pipeline for student questionnaire data
//!
//! Mindgauge turns free-form questionnaire answers into a structured diagnosis
//! record through a deterministic pipeline: validation → feature engineering →
//! classification → risk-factor analysis → recommendation generation →
//! record assembly.
//!
//! ## Modules
//!
//! - **Schema**: Typed raw answers with enumeration and range validation
//! - **Mapper**: Feature engineering (lookups, encodings, composite risk score)
//! - **Model**: Classifier adapter loading a scaled logistic-regression artifact
//! - **Risk**: Fixed-order threshold rules producing severity-tagged factors
//! - **Recommend**: Probability-band and factor-keyed advisory strings
//! - **Report**: Final record assembly with confidence/risk labels

pub mod error;
pub mod mapper;
pub mod model;
pub mod pipeline;
pub mod recommend;
pub mod report;
pub mod risk;
pub mod schema;
pub mod types;

pub use error::DiagnosisError;
pub use mapper::FeatureMapper;
pub use model::{Classifier, LinearModel, ModelArtifact, ModelInfo};
pub use pipeline::DiagnosisEngine;
pub use recommend::Recommender;
pub use report::ReportAssembler;
pub use risk::RiskAnalyzer;
pub use schema::RawAnswers;
pub use types::{DiagnosisRecord, Feature, FeatureVector, PredictionResult, RiskFactor};

/// Engine version embedded in all diagnosis records
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for diagnosis records
pub const PRODUCER_NAME: &str = "mindgauge";
