//! Risk factor analysis
//!
//! Independent threshold rules evaluated against raw answers. Each rule
//! optionally emits one factor; the emission order is fixed and preserved in
//! the output so downstream consumers (recommendations, display) see a stable
//! sequence.

use crate::schema::{DietaryHabits, RawAnswers, SleepDuration};
use crate::types::{Impact, RiskFactor};

/// Risk analyzer evaluating the fixed rule set
pub struct RiskAnalyzer;

impl RiskAnalyzer {
    /// Evaluate all rules against the answers, in fixed order.
    ///
    /// Rules are independent: one rule not firing never suppresses another.
    pub fn analyze(raw: &RawAnswers) -> Vec<RiskFactor> {
        [
            academic_pressure_rule(raw),
            financial_stress_rule(raw),
            sleep_rule(raw),
            diet_rule(raw),
            suicidal_thoughts_rule(raw),
            family_history_rule(raw),
            work_pressure_rule(raw),
            study_satisfaction_rule(raw),
            job_satisfaction_rule(raw),
            academic_performance_rule(raw),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn academic_pressure_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let level = raw.academic_pressure;
    if level < 4.0 {
        return None;
    }
    Some(RiskFactor {
        factor: "High Academic Pressure".to_string(),
        value: level.into(),
        impact: if level >= 5.0 { Impact::High } else { Impact::Medium },
        description: format!("Academic pressure level of {level}/5 indicates significant stress"),
    })
}

fn financial_stress_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let level = raw.financial_stress;
    if level < 4.0 {
        return None;
    }
    Some(RiskFactor {
        factor: "High Financial Stress".to_string(),
        value: level.into(),
        impact: if level >= 5.0 { Impact::High } else { Impact::Medium },
        description: format!(
            "Financial stress level of {level}/5 indicates significant financial pressure"
        ),
    })
}

fn sleep_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let impact = match raw.sleep_duration {
        SleepDuration::LessThanFiveHours => Impact::High,
        SleepDuration::FiveToSixHours => Impact::Medium,
        _ => return None,
    };
    let category = raw.sleep_duration.as_str();
    Some(RiskFactor {
        factor: "Insufficient Sleep".to_string(),
        value: category.into(),
        impact,
        description: format!("Sleep duration of {category} may contribute to mental health issues"),
    })
}

fn diet_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    if raw.dietary_habits != DietaryHabits::Unhealthy {
        return None;
    }
    Some(RiskFactor {
        factor: "Unhealthy Diet".to_string(),
        value: raw.dietary_habits.as_str().into(),
        impact: Impact::Medium,
        description: "Unhealthy dietary habits may negatively impact mental health".to_string(),
    })
}

fn suicidal_thoughts_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    if !raw.suicidal_thoughts.is_yes() {
        return None;
    }
    // Always the highest severity, unconditionally
    Some(RiskFactor {
        factor: "History of Suicidal Thoughts".to_string(),
        value: raw.suicidal_thoughts.as_str().into(),
        impact: Impact::Critical,
        description: "Previous suicidal thoughts indicate high risk and require immediate attention"
            .to_string(),
    })
}

fn family_history_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    if !raw.family_history.is_yes() {
        return None;
    }
    Some(RiskFactor {
        factor: "Family History of Mental Illness".to_string(),
        value: raw.family_history.as_str().into(),
        impact: Impact::Medium,
        description: "Family history of mental illness increases risk of developing similar conditions"
            .to_string(),
    })
}

fn work_pressure_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let level = raw.work_pressure;
    if level < 4.0 {
        return None;
    }
    Some(RiskFactor {
        factor: "High Work Pressure".to_string(),
        value: level.into(),
        impact: if level >= 5.0 { Impact::High } else { Impact::Medium },
        description: format!("Work pressure level of {level}/5 indicates significant workplace stress"),
    })
}

fn study_satisfaction_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let level = raw.study_satisfaction;
    if level > 2.0 {
        return None;
    }
    Some(RiskFactor {
        factor: "Low Study Satisfaction".to_string(),
        value: level.into(),
        impact: Impact::Medium,
        description: format!(
            "Study satisfaction level of {level}/5 indicates dissatisfaction with academic life"
        ),
    })
}

fn job_satisfaction_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let level = raw.job_satisfaction;
    // 0 means "no job", not a low rating
    if level <= 0.0 || level > 2.0 {
        return None;
    }
    Some(RiskFactor {
        factor: "Low Job Satisfaction".to_string(),
        value: level.into(),
        impact: Impact::Medium,
        description: format!("Job satisfaction level of {level}/5 indicates workplace dissatisfaction"),
    })
}

fn academic_performance_rule(raw: &RawAnswers) -> Option<RiskFactor> {
    let cgpa = raw.cgpa;
    if cgpa >= 6.0 {
        return None;
    }
    Some(RiskFactor {
        factor: "Low Academic Performance".to_string(),
        value: cgpa.into(),
        impact: Impact::Medium,
        description: format!("CGPA of {cgpa} may indicate academic struggles affecting mental health"),
    })
}
