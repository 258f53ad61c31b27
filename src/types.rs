//! Core types for the Mindgauge pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: the feature vector contract, risk factors, classifier output, and
//! the final diagnosis record.

use serde::{Deserialize, Serialize};

/// A single feature the classifier consumes.
///
/// The variants are the closed set of columns a model artifact may declare.
/// `column_name` returns the exact column string used in artifacts, which
/// carries over the training dataset's original headers (including the odd
/// questionnaire-phrased ones).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    AcademicPressure,
    WorkPressure,
    Cgpa,
    StudySatisfaction,
    JobSatisfaction,
    WorkStudyHours,
    FinancialStress,
    SleepHours,
    DietScore,
    RiskScore,
    GenderEncoded,
    ProfessionEncoded,
    SuicidalThoughtsEncoded,
    FamilyHistoryEncoded,
}

impl Feature {
    /// All features, in the canonical order the default contract uses
    pub const ALL: [Feature; 15] = [
        Feature::Age,
        Feature::AcademicPressure,
        Feature::WorkPressure,
        Feature::Cgpa,
        Feature::StudySatisfaction,
        Feature::JobSatisfaction,
        Feature::WorkStudyHours,
        Feature::FinancialStress,
        Feature::SleepHours,
        Feature::DietScore,
        Feature::RiskScore,
        Feature::GenderEncoded,
        Feature::ProfessionEncoded,
        Feature::SuicidalThoughtsEncoded,
        Feature::FamilyHistoryEncoded,
    ];

    /// Column name as it appears in model artifacts
    pub fn column_name(&self) -> &'static str {
        match self {
            Feature::Age => "Age",
            Feature::AcademicPressure => "Academic Pressure",
            Feature::WorkPressure => "Work Pressure",
            Feature::Cgpa => "CGPA",
            Feature::StudySatisfaction => "Study Satisfaction",
            Feature::JobSatisfaction => "Job Satisfaction",
            Feature::WorkStudyHours => "Work/Study Hours",
            Feature::FinancialStress => "Financial Stress",
            Feature::SleepHours => "Sleep_Hours",
            Feature::DietScore => "Diet_Score",
            Feature::RiskScore => "Risk_Score",
            Feature::GenderEncoded => "Gender_encoded",
            Feature::ProfessionEncoded => "Profession_encoded",
            Feature::SuicidalThoughtsEncoded => "Have you ever had suicidal thoughts ?_encoded",
            Feature::FamilyHistoryEncoded => "Family History of Mental Illness_encoded",
        }
    }

    /// Resolve an artifact column name back to a feature
    pub fn from_column_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.column_name() == name)
    }
}

/// The full set of engineered features for one request.
///
/// Every feature the classifier can ask for is present by construction, so a
/// contract-ordered vector never has missing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub age: f64,
    pub academic_pressure: f64,
    pub work_pressure: f64,
    pub cgpa: f64,
    pub study_satisfaction: f64,
    pub job_satisfaction: f64,
    pub work_study_hours: f64,
    pub financial_stress: f64,
    pub sleep_hours: f64,
    pub diet_score: f64,
    pub risk_score: f64,
    pub gender_encoded: f64,
    pub profession_encoded: f64,
    pub suicidal_thoughts_encoded: f64,
    pub family_history_encoded: f64,
}

impl FeatureVector {
    /// Value of a single feature
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Age => self.age,
            Feature::AcademicPressure => self.academic_pressure,
            Feature::WorkPressure => self.work_pressure,
            Feature::Cgpa => self.cgpa,
            Feature::StudySatisfaction => self.study_satisfaction,
            Feature::JobSatisfaction => self.job_satisfaction,
            Feature::WorkStudyHours => self.work_study_hours,
            Feature::FinancialStress => self.financial_stress,
            Feature::SleepHours => self.sleep_hours,
            Feature::DietScore => self.diet_score,
            Feature::RiskScore => self.risk_score,
            Feature::GenderEncoded => self.gender_encoded,
            Feature::ProfessionEncoded => self.profession_encoded,
            Feature::SuicidalThoughtsEncoded => self.suicidal_thoughts_encoded,
            Feature::FamilyHistoryEncoded => self.family_history_encoded,
        }
    }

    /// Values in the order a model contract declares them
    pub fn ordered(&self, contract: &[Feature]) -> Vec<f64> {
        contract.iter().map(|f| self.get(*f)).collect()
    }
}

/// Severity of an identified risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

/// A named, severity-tagged condition derived from raw answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Short display name, e.g. "High Academic Pressure"
    pub factor: String,
    /// The raw answer value that triggered the rule (number or category string)
    pub value: serde_json::Value,
    pub impact: Impact,
    pub description: String,
}

/// Raw classifier output: binary class plus probability of the positive class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0 = not depressed, 1 = depressed
    pub prediction: u8,
    /// Probability of the positive class, in [0, 1]
    pub probability: f64,
}

/// Heuristic label for how far the probability sits from the decision boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Band the probability into a confidence label.
    ///
    /// The predicate is intentionally non-exhaustive around the middle of the
    /// range (0.4..=0.6 falls through to Low); it is a product-fixed rule and
    /// must not be tidied up without sign-off.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.8 || probability < 0.2 {
            Confidence::High
        } else if probability > 0.6 || probability < 0.4 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Heuristic bucketing of probability for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            RiskLevel::High
        } else if probability > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Producer metadata embedded in every diagnosis record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Final aggregate for one diagnosis request.
///
/// Immutable after construction; serializes to the wire shape the service
/// layer returns to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    /// 0 (not depressed) or 1 (depressed)
    pub prediction: u8,
    /// Probability of depression, in [0, 1]
    pub probability: f64,
    pub confidence: Confidence,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    /// At most 10 entries, no duplicates
    pub recommendations: Vec<String>,
    /// RFC 3339 timestamp of when the record was assembled
    pub timestamp: String,
    pub producer: Producer,
}
