//! Raw questionnaire answers
//!
//! One `RawAnswers` value is constructed per diagnosis request, validated, fed
//! through the pipeline, and discarded. Nothing here is ever persisted.
//!
//! Categorical fields deserialize known category strings into typed variants;
//! anything else lands in an `Unrecognized` catch-all that `validate` rejects.
//! This keeps deserialization total while still surfacing enumeration
//! violations to the caller before the pipeline runs.

use serde::{Deserialize, Serialize};

/// Gender as collected by the questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Gender {
    /// Ordinal encoding used by the trained model
    pub fn encode(&self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Other => 2,
            Gender::Unrecognized(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unrecognized(s) => s.as_str(),
        }
    }
}

/// Self-reported sleep duration category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepDuration {
    #[serde(rename = "Less than 5 hours")]
    LessThanFiveHours,
    #[serde(rename = "5-6 hours")]
    FiveToSixHours,
    #[serde(rename = "7-8 hours")]
    SevenToEightHours,
    #[serde(rename = "More than 8 hours")]
    MoreThanEightHours,
    Others,
    #[serde(untagged)]
    Unrecognized(String),
}

impl SleepDuration {
    /// Numeric hours the category maps to in the feature vector.
    /// Unrecognized categories fall back to the 7-8 hour midpoint.
    pub fn hours(&self) -> f64 {
        match self {
            SleepDuration::LessThanFiveHours => 4.0,
            SleepDuration::FiveToSixHours => 5.5,
            SleepDuration::SevenToEightHours => 7.5,
            SleepDuration::MoreThanEightHours => 9.0,
            SleepDuration::Others => 6.0,
            SleepDuration::Unrecognized(_) => 7.5,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SleepDuration::LessThanFiveHours => "Less than 5 hours",
            SleepDuration::FiveToSixHours => "5-6 hours",
            SleepDuration::SevenToEightHours => "7-8 hours",
            SleepDuration::MoreThanEightHours => "More than 8 hours",
            SleepDuration::Others => "Others",
            SleepDuration::Unrecognized(s) => s.as_str(),
        }
    }
}

/// Self-reported dietary habits category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietaryHabits {
    Unhealthy,
    Moderate,
    Healthy,
    Others,
    #[serde(untagged)]
    Unrecognized(String),
}

impl DietaryHabits {
    /// Numeric diet score: 1 (unhealthy) to 3 (healthy), 2 for everything else
    pub fn score(&self) -> f64 {
        match self {
            DietaryHabits::Unhealthy => 1.0,
            DietaryHabits::Moderate => 2.0,
            DietaryHabits::Healthy => 3.0,
            DietaryHabits::Others => 2.0,
            DietaryHabits::Unrecognized(_) => 2.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DietaryHabits::Unhealthy => "Unhealthy",
            DietaryHabits::Moderate => "Moderate",
            DietaryHabits::Healthy => "Healthy",
            DietaryHabits::Others => "Others",
            DietaryHabits::Unrecognized(s) => s.as_str(),
        }
    }
}

/// Yes/No answer (suicidal thoughts, family history)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
    #[serde(untagged)]
    Unrecognized(String),
}

impl YesNo {
    pub fn encode(&self) -> u8 {
        match self {
            YesNo::No => 0,
            YesNo::Yes => 1,
            YesNo::Unrecognized(_) => 0,
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }

    pub fn as_str(&self) -> &str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Yes",
            YesNo::Unrecognized(s) => s.as_str(),
        }
    }
}

/// Respondent's profession
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profession {
    Student,
    Employee,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    Unemployed,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Profession {
    pub fn encode(&self) -> u8 {
        match self {
            Profession::Student => 0,
            Profession::Employee => 1,
            Profession::SelfEmployed => 2,
            Profession::Unemployed => 3,
            Profession::Other => 4,
            Profession::Unrecognized(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Profession::Student => "Student",
            Profession::Employee => "Employee",
            Profession::SelfEmployed => "Self-employed",
            Profession::Unemployed => "Unemployed",
            Profession::Other => "Other",
            Profession::Unrecognized(s) => s.as_str(),
        }
    }
}

/// One respondent's complete questionnaire answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnswers {
    /// Age in years (16-100)
    pub age: f64,
    pub gender: Gender,
    /// Academic pressure level (1-5)
    pub academic_pressure: f64,
    /// Work pressure level (1-5)
    pub work_pressure: f64,
    /// Cumulative grade point average (0-10)
    pub cgpa: f64,
    /// Study satisfaction level (1-5)
    pub study_satisfaction: f64,
    /// Job satisfaction level (1-5), 0 when the respondent has no job
    pub job_satisfaction: f64,
    /// Combined work/study hours per day (0-24)
    pub work_study_hours: f64,
    /// Financial stress level (1-5)
    pub financial_stress: f64,
    pub sleep_duration: SleepDuration,
    pub dietary_habits: DietaryHabits,
    /// History of suicidal thoughts
    pub suicidal_thoughts: YesNo,
    /// Family history of mental illness
    pub family_history: YesNo,
    /// Free text
    pub city: String,
    pub profession: Profession,
    /// Free text
    pub degree: String,
}

impl RawAnswers {
    /// Check every answer against its range or enumeration constraint.
    ///
    /// The pipeline calls this before mapping; a failure means the request is
    /// rejected and never reaches the classifier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("age", self.age, 16.0, 100.0)?;
        check_range("academic_pressure", self.academic_pressure, 1.0, 5.0)?;
        check_range("work_pressure", self.work_pressure, 1.0, 5.0)?;
        check_range("cgpa", self.cgpa, 0.0, 10.0)?;
        check_range("study_satisfaction", self.study_satisfaction, 1.0, 5.0)?;
        // 0 is the "not applicable" sentinel for respondents without a job
        check_range("job_satisfaction", self.job_satisfaction, 0.0, 5.0)?;
        check_range("work_study_hours", self.work_study_hours, 0.0, 24.0)?;
        check_range("financial_stress", self.financial_stress, 1.0, 5.0)?;

        check_category("gender", matches!(self.gender, Gender::Unrecognized(_)), self.gender.as_str())?;
        check_category(
            "sleep_duration",
            matches!(self.sleep_duration, SleepDuration::Unrecognized(_)),
            self.sleep_duration.as_str(),
        )?;
        check_category(
            "dietary_habits",
            matches!(self.dietary_habits, DietaryHabits::Unrecognized(_)),
            self.dietary_habits.as_str(),
        )?;
        check_category(
            "suicidal_thoughts",
            matches!(self.suicidal_thoughts, YesNo::Unrecognized(_)),
            self.suicidal_thoughts.as_str(),
        )?;
        check_category(
            "family_history",
            matches!(self.family_history, YesNo::Unrecognized(_)),
            self.family_history.as_str(),
        )?;
        check_category(
            "profession",
            matches!(self.profession, Profession::Unrecognized(_)),
            self.profession.as_str(),
        )?;

        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    // NaN fails both comparisons and is rejected
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value, min, max })
    }
}

fn check_category(field: &'static str, unrecognized: bool, value: &str) -> Result<(), ValidationError> {
    if unrecognized {
        Err(ValidationError::UnknownCategory {
            field,
            value: value.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validation errors for raw answers
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} has unrecognized value \"{value}\"")]
    UnknownCategory { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_test_answers() -> RawAnswers {
        RawAnswers {
            age: 21.0,
            gender: Gender::Female,
            academic_pressure: 3.0,
            work_pressure: 2.0,
            cgpa: 7.5,
            study_satisfaction: 4.0,
            job_satisfaction: 0.0,
            work_study_hours: 6.0,
            financial_stress: 2.0,
            sleep_duration: SleepDuration::SevenToEightHours,
            dietary_habits: DietaryHabits::Moderate,
            suicidal_thoughts: YesNo::No,
            family_history: YesNo::No,
            city: "Pune".to_string(),
            profession: Profession::Student,
            degree: "B.Tech".to_string(),
        }
    }

    #[test]
    fn test_valid_answers_pass() {
        assert!(make_test_answers().validate().is_ok());
    }

    #[test]
    fn test_numeric_bounds_rejected() {
        let cases: [(&str, fn(&mut RawAnswers)); 12] = [
            ("age", |a: &mut RawAnswers| a.age = 15.0),
            ("age", |a: &mut RawAnswers| a.age = 101.0),
            ("academic_pressure", |a: &mut RawAnswers| a.academic_pressure = 0.0),
            ("academic_pressure", |a: &mut RawAnswers| a.academic_pressure = 6.0),
            ("work_pressure", |a: &mut RawAnswers| a.work_pressure = 0.5),
            ("cgpa", |a: &mut RawAnswers| a.cgpa = 10.5),
            ("cgpa", |a: &mut RawAnswers| a.cgpa = -1.0),
            ("study_satisfaction", |a: &mut RawAnswers| a.study_satisfaction = 0.0),
            ("job_satisfaction", |a: &mut RawAnswers| a.job_satisfaction = -1.0),
            ("job_satisfaction", |a: &mut RawAnswers| a.job_satisfaction = 5.5),
            ("work_study_hours", |a: &mut RawAnswers| a.work_study_hours = 25.0),
            ("financial_stress", |a: &mut RawAnswers| a.financial_stress = 0.0),
        ];

        for (field, mutate) in cases {
            let mut answers = make_test_answers();
            mutate(&mut answers);
            match answers.validate() {
                Err(ValidationError::OutOfRange { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected OutOfRange for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut answers = make_test_answers();
        answers.cgpa = f64::NAN;
        assert!(answers.validate().is_err());
    }

    #[test]
    fn test_job_satisfaction_zero_is_allowed() {
        let mut answers = make_test_answers();
        answers.job_satisfaction = 0.0;
        assert!(answers.validate().is_ok());
    }

    #[test]
    fn test_category_strings_deserialize() {
        let sleep: SleepDuration = serde_json::from_str("\"Less than 5 hours\"").unwrap();
        assert_eq!(sleep, SleepDuration::LessThanFiveHours);
        assert!((sleep.hours() - 4.0).abs() < f64::EPSILON);

        let diet: DietaryHabits = serde_json::from_str("\"Unhealthy\"").unwrap();
        assert!((diet.score() - 1.0).abs() < f64::EPSILON);

        let profession: Profession = serde_json::from_str("\"Self-employed\"").unwrap();
        assert_eq!(profession.encode(), 2);
    }

    #[test]
    fn test_unrecognized_category_rejected_by_validate() {
        let sleep: SleepDuration = serde_json::from_str("\"8-9 hours\"").unwrap();
        assert_eq!(sleep, SleepDuration::Unrecognized("8-9 hours".to_string()));
        // Mapping still works via the fallback
        assert!((sleep.hours() - 7.5).abs() < f64::EPSILON);

        let mut answers = make_test_answers();
        answers.sleep_duration = sleep;
        match answers.validate() {
            Err(ValidationError::UnknownCategory { field, value }) => {
                assert_eq!(field, "sleep_duration");
                assert_eq!(value, "8-9 hours");
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_answers_serde_round_trip() {
        let answers = make_test_answers();
        let json = serde_json::to_string(&answers).unwrap();
        let parsed: RawAnswers = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, answers);

        // Wire format uses the questionnaire's category strings
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sleep_duration"], "7-8 hours");
        assert_eq!(value["suicidal_thoughts"], "No");
    }
}
