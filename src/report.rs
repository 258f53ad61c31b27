//! Diagnosis record assembly
//!
//! Combines classifier output, risk factors, and recommendations into the
//! final immutable record, deriving the confidence and risk-level labels and
//! stamping producer metadata.

use crate::types::{Confidence, DiagnosisRecord, PredictionResult, Producer, RiskFactor, RiskLevel};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Assembler producing [`DiagnosisRecord`]s with a stable instance identity
pub struct ReportAssembler {
    producer: Producer,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAssembler {
    /// Create an assembler with a unique instance ID
    pub fn new() -> Self {
        Self::with_instance_id(Uuid::new_v4().to_string())
    }

    /// Create an assembler with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id,
            },
        }
    }

    /// Assemble the final record for one request
    pub fn assemble(
        &self,
        prediction: PredictionResult,
        risk_factors: Vec<RiskFactor>,
        recommendations: Vec<String>,
    ) -> DiagnosisRecord {
        DiagnosisRecord {
            prediction: prediction.prediction,
            probability: prediction.probability,
            confidence: Confidence::from_probability(prediction.probability),
            risk_level: RiskLevel::from_probability(prediction.probability),
            risk_factors,
            recommendations,
            timestamp: Utc::now().to_rfc3339(),
            producer: self.producer.clone(),
        }
    }
}
