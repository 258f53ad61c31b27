//! Feature engineering
//!
//! This module converts validated questionnaire answers into the numeric
//! feature vector the classifier consumes:
//! - Numeric answers pass through unchanged
//! - Sleep duration and dietary habits map to numeric scores
//! - Categorical answers map to ordinal encodings
//! - A composite risk score is derived as an additional signal

use crate::schema::{DietaryHabits, Gender, Profession, RawAnswers, SleepDuration, YesNo};
use crate::types::FeatureVector;
use tracing::warn;

/// Feature mapper for turning raw answers into feature vectors
pub struct FeatureMapper;

impl FeatureMapper {
    /// Map raw answers to the full feature vector.
    ///
    /// This is a pure function of its input: identical answers always yield
    /// identical vectors. It never fails; questionable inputs degrade to
    /// defaults with a logged warning.
    pub fn map(raw: &RawAnswers) -> FeatureVector {
        warn_unrecognized(raw);

        let age = passthrough("age", raw.age);
        let academic_pressure = passthrough("academic_pressure", raw.academic_pressure);
        let work_pressure = passthrough("work_pressure", raw.work_pressure);
        let cgpa = passthrough("cgpa", raw.cgpa);
        let study_satisfaction = passthrough("study_satisfaction", raw.study_satisfaction);
        let job_satisfaction = passthrough("job_satisfaction", raw.job_satisfaction);
        let work_study_hours = passthrough("work_study_hours", raw.work_study_hours);
        let financial_stress = passthrough("financial_stress", raw.financial_stress);

        let sleep_hours = raw.sleep_duration.hours();
        let diet_score = raw.dietary_habits.score();
        let gender_encoded = f64::from(raw.gender.encode());
        let profession_encoded = f64::from(raw.profession.encode());
        let suicidal_thoughts_encoded = f64::from(raw.suicidal_thoughts.encode());
        let family_history_encoded = f64::from(raw.family_history.encode());

        let risk_score = compute_risk_score(
            academic_pressure,
            financial_stress,
            sleep_hours,
            diet_score,
            suicidal_thoughts_encoded,
            family_history_encoded,
        );

        FeatureVector {
            age,
            academic_pressure,
            work_pressure,
            cgpa,
            study_satisfaction,
            job_satisfaction,
            work_study_hours,
            financial_stress,
            sleep_hours,
            diet_score,
            risk_score,
            gender_encoded,
            profession_encoded,
            suicidal_thoughts_encoded,
            family_history_encoded,
        }
    }
}

/// Copy a numeric answer into the vector, defaulting non-finite values to 0.0.
/// A degraded value is a data-quality warning, never an error.
fn passthrough(field: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(field, value, "non-finite numeric answer, defaulting to 0.0");
        0.0
    }
}

/// Composite risk score: a fixed linear weighting of the strongest depression
/// signals. Less sleep and an unhealthier diet increase the score, hence the
/// inverted terms. The weights are product-fixed, not learned.
fn compute_risk_score(
    academic_pressure: f64,
    financial_stress: f64,
    sleep_hours: f64,
    diet_score: f64,
    suicidal_encoded: f64,
    family_encoded: f64,
) -> f64 {
    let score = academic_pressure * 0.2
        + financial_stress * 0.2
        + (5.0 - sleep_hours) * 0.1
        + (4.0 - diet_score) * 0.1
        + suicidal_encoded * 0.3
        + family_encoded * 0.1;

    if score.is_finite() {
        score
    } else {
        warn!(score, "risk score computation degraded, defaulting to 0.0");
        0.0
    }
}

fn warn_unrecognized(raw: &RawAnswers) {
    if let SleepDuration::Unrecognized(s) = &raw.sleep_duration {
        warn!(value = %s, "unrecognized sleep_duration, using default hours");
    }
    if let DietaryHabits::Unrecognized(s) = &raw.dietary_habits {
        warn!(value = %s, "unrecognized dietary_habits, using default score");
    }
    if let Gender::Unrecognized(s) = &raw.gender {
        warn!(value = %s, "unrecognized gender, using default encoding");
    }
    if let Profession::Unrecognized(s) = &raw.profession {
        warn!(value = %s, "unrecognized profession, using default encoding");
    }
    if let YesNo::Unrecognized(s) = &raw.suicidal_thoughts {
        warn!(value = %s, "unrecognized suicidal_thoughts, using default encoding");
    }
    if let YesNo::Unrecognized(s) = &raw.family_history {
        warn!(value = %s, "unrecognized family_history, using default encoding");
    }
}
