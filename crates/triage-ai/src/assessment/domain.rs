use serde::{Deserialize, Serialize};

/// Gender choices offered by the intake form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    PreferNotToSay,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer-not-to-say",
        }
    }

    /// Parse a form value into a gender choice. Case-insensitive; `None` for
    /// anything outside the published set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "prefer-not-to-say" => Some(Gender::PreferNotToSay),
            _ => None,
        }
    }
}

/// Canonical sanitized payload transmitted to the assessment endpoint.
///
/// Produced exclusively by [`crate::assessment::sanitize::sanitize_form`]
/// after validation has passed, and never mutated afterwards. The wire format
/// uses the snake_case keys the assessment backend expects
/// (`medical_history`, `current_medications`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub symptoms: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub current_medications: String,
}

/// Risk bands reported by the assessment backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

/// Urgency ladder used in clinician-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Routine,
    Monitor,
    Urgent,
    Emergency,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Routine => "Routine",
            Urgency::Monitor => "Monitor",
            Urgency::Urgent => "Urgent",
            Urgency::Emergency => "Emergency",
        }
    }
}

/// Structured assessment returned by the external service.
///
/// This is the single canonical response shape; replies that deserialize into
/// anything else are surfaced as malformed rather than repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub urgency: Urgency,
    pub clinical_reasoning: String,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    pub confidence_score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_accepts_published_set() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse(" Female "), Some(Gender::Female));
        assert_eq!(Gender::parse("prefer-not-to-say"), Some(Gender::PreferNotToSay));
        assert_eq!(Gender::parse("unsure"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn request_serializes_with_snake_case_wire_keys() {
        let payload = AssessmentRequest {
            name: "John Doe".to_string(),
            age: 30,
            gender: Gender::Male,
            symptoms: "Headaches and fatigue for a week".to_string(),
            medical_history: String::new(),
            current_medications: String::new(),
        };

        let wire = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(wire["gender"], "male");
        assert_eq!(wire["age"], 30);
        assert!(wire.get("medical_history").is_some());
        assert!(wire.get("current_medications").is_some());
        assert!(wire.get("medicalHistory").is_none());
    }

    #[test]
    fn outcome_rejects_unknown_risk_band() {
        let body = serde_json::json!({
            "risk_level": "Catastrophic",
            "risk_score": 90,
            "urgency": "Urgent",
            "clinical_reasoning": "n/a",
            "recommendations": [],
            "confidence_score": 0.8,
        });
        assert!(serde_json::from_value::<AssessmentOutcome>(body).is_err());
    }

    #[test]
    fn outcome_defaults_missing_red_flags() {
        let body = serde_json::json!({
            "risk_level": "Low",
            "risk_score": 12,
            "urgency": "Routine",
            "clinical_reasoning": "mild presentation",
            "recommendations": ["rest"],
            "confidence_score": 0.9,
        });
        let outcome = serde_json::from_value::<AssessmentOutcome>(body).expect("parse outcome");
        assert!(outcome.red_flags.is_empty());
    }
}
