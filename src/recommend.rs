//! Recommendation generation
//!
//! Advisory strings are seeded by probability band, extended with a fixed pair
//! per identified risk factor, deduplicated in first-seen order, and capped.

use crate::types::RiskFactor;
use std::collections::HashSet;

/// Maximum number of recommendations returned per request
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Returned when recommendation generation produces nothing usable
pub const FALLBACK_RECOMMENDATION: &str =
    "Please consult with a mental health professional for personalized advice";

const CRISIS_TIER: [&str; 3] = [
    "Seek immediate professional help from a mental health counselor or therapist",
    "Consider reaching out to a trusted friend or family member for support",
    "Contact a mental health helpline if you're in crisis",
];

const MODERATE_TIER: [&str; 3] = [
    "Consider speaking with a mental health professional for assessment",
    "Focus on stress management techniques and self-care",
    "Maintain regular sleep and exercise routines",
];

const MAINTENANCE_TIER: [&str; 3] = [
    "Continue maintaining good mental health practices",
    "Stay connected with friends and family",
    "Engage in activities you enjoy",
];

/// Recommendation engine mapping probability band + risk factors to advice
pub struct Recommender;

impl Recommender {
    /// Generate the advisory list for one request.
    ///
    /// The output is deduplicated by exact string (first occurrence wins) and
    /// truncated to [`MAX_RECOMMENDATIONS`] entries.
    pub fn recommend(probability: f64, factors: &[RiskFactor]) -> Vec<String> {
        let mut recommendations: Vec<&str> = Vec::new();

        if probability > 0.7 {
            recommendations.extend(CRISIS_TIER);
        } else if probability > 0.4 {
            recommendations.extend(MODERATE_TIER);
        } else {
            recommendations.extend(MAINTENANCE_TIER);
        }

        for factor in factors {
            recommendations.extend(factor_advice(&factor.factor));
        }

        let mut seen = HashSet::new();
        let mut unique: Vec<String> = recommendations
            .into_iter()
            .filter(|r| seen.insert(*r))
            .map(str::to_string)
            .collect();
        unique.truncate(MAX_RECOMMENDATIONS);

        if unique.is_empty() {
            unique.push(FALLBACK_RECOMMENDATION.to_string());
        }
        unique
    }
}

/// Two advisory strings per factor category, keyed by substring match on the
/// factor name. Categories are checked in a fixed priority order; the first
/// match wins (so "Low Study Satisfaction" hits the satisfaction pair, not two).
fn factor_advice(factor: &str) -> [&'static str; 2] {
    if factor.contains("Academic Pressure") {
        [
            "Consider academic counseling or tutoring to manage study stress",
            "Break down large assignments into smaller, manageable tasks",
        ]
    } else if factor.contains("Financial Stress") {
        [
            "Seek financial counseling or speak with a financial advisor",
            "Look into scholarships, grants, or part-time work opportunities",
        ]
    } else if factor.contains("Sleep") {
        [
            "Establish a consistent sleep schedule and bedtime routine",
            "Avoid screens 1 hour before bedtime and create a relaxing environment",
        ]
    } else if factor.contains("Diet") {
        [
            "Focus on a balanced diet with regular meals",
            "Consider consulting a nutritionist for dietary guidance",
        ]
    } else if factor.contains("Suicidal Thoughts") {
        [
            "URGENT: Contact a mental health professional immediately",
            "Call a suicide prevention hotline if you're in crisis",
        ]
    } else if factor.contains("Family History") {
        [
            "Be aware of your family history and monitor your mental health regularly",
            "Consider preventive mental health counseling",
        ]
    } else if factor.contains("Work Pressure") {
        [
            "Discuss workload with your supervisor or academic advisor",
            "Practice time management and delegation techniques",
        ]
    } else if factor.contains("Satisfaction") {
        [
            "Explore new interests or hobbies to increase life satisfaction",
            "Consider career counseling or academic guidance",
        ]
    } else if factor.contains("Academic Performance") {
        [
            "Seek academic support services or tutoring",
            "Meet with academic advisors to discuss study strategies",
        ]
    } else {
        [FALLBACK_RECOMMENDATION, FALLBACK_RECOMMENDATION]
    }
}
