use serde::{Deserialize, Serialize};

use super::domain::{AssessmentRequest, RiskLevel, Urgency};

/// Symptom keywords the preview recognizes, most specific first.
const KNOWN_SYMPTOMS: [&str; 9] = [
    "chest pain",
    "shortness of breath",
    "dizziness",
    "headache",
    "nausea",
    "fatigue",
    "fever",
    "cough",
    "abdominal pain",
];

const SEVERE_MARKERS: [&str; 5] = ["severe", "extreme", "intense", "unbearable", "emergency"];
const MODERATE_MARKERS: [&str; 4] = ["moderate", "significant", "noticeable", "concerning"];

/// Severity read from the free-text description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

/// Tunable scoring dials for the offline triage preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRules {
    pub base_score: u8,
    pub per_symptom: u8,
    pub elderly_age: u8,
    pub elderly_bonus: u8,
    pub minor_age: u8,
    pub minor_bonus: u8,
    pub severe_bonus: u8,
    pub moderate_bonus: u8,
    pub urgent_threshold: u8,
    pub monitor_threshold: u8,
    pub high_risk_threshold: u8,
    pub moderate_risk_threshold: u8,
}

impl Default for TriageRules {
    fn default() -> Self {
        Self {
            base_score: 20,
            per_symptom: 15,
            elderly_age: 65,
            elderly_bonus: 20,
            minor_age: 18,
            minor_bonus: 10,
            severe_bonus: 20,
            moderate_bonus: 10,
            urgent_threshold: 75,
            monitor_threshold: 50,
            high_risk_threshold: 70,
            moderate_risk_threshold: 40,
        }
    }
}

/// Rule-based preview computed locally, without any network call.
///
/// This stands beside the external assessment rather than replacing it; a
/// failed submission is still surfaced as an error, never papered over with
/// a preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriagePreview {
    pub primary_symptom: &'static str,
    pub severity: Severity,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
}

/// Stateless engine applying [`TriageRules`] to a canonical payload.
pub struct TriageEngine {
    rules: TriageRules,
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new(TriageRules::default())
    }
}

impl TriageEngine {
    pub fn new(rules: TriageRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TriageRules {
        &self.rules
    }

    pub fn preview(&self, request: &AssessmentRequest) -> TriagePreview {
        let text = request.symptoms.to_lowercase();
        let severity = estimate_severity(&text);
        let mentioned = KNOWN_SYMPTOMS
            .iter()
            .filter(|symptom| text.contains(*symptom))
            .count() as u32;

        let mut score = u32::from(self.rules.base_score) + mentioned * u32::from(self.rules.per_symptom);
        if request.age > self.rules.elderly_age {
            score += u32::from(self.rules.elderly_bonus);
        } else if request.age < self.rules.minor_age {
            score += u32::from(self.rules.minor_bonus);
        }
        score += match severity {
            Severity::Severe => u32::from(self.rules.severe_bonus),
            Severity::Moderate => u32::from(self.rules.moderate_bonus),
            Severity::Mild => 0,
        };
        let score = score.min(100) as u8;

        let urgency = if score >= self.rules.urgent_threshold {
            Urgency::Urgent
        } else if score >= self.rules.monitor_threshold {
            Urgency::Monitor
        } else {
            Urgency::Routine
        };

        let risk_level = if score >= self.rules.high_risk_threshold {
            RiskLevel::High
        } else if score >= self.rules.moderate_risk_threshold {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };

        TriagePreview {
            primary_symptom: extract_primary_symptom(&text),
            severity,
            risk_score: score,
            risk_level,
            urgency,
            recommendations: standing_recommendations(),
        }
    }
}

/// Pick the leading symptom keyword, preferring the circulatory and head
/// complaints the risk model weighs heaviest; `fatigue` is the fallback when
/// nothing matches.
fn extract_primary_symptom(text: &str) -> &'static str {
    if text.contains("dizzy") || text.contains("dizziness") {
        return "dizziness";
    }
    if text.contains("chest pain") {
        return "chest pain";
    }
    if text.contains("headache") || text.contains("head") {
        return "headache";
    }
    KNOWN_SYMPTOMS
        .iter()
        .find(|symptom| text.contains(*symptom))
        .copied()
        .unwrap_or("fatigue")
}

fn estimate_severity(text: &str) -> Severity {
    if SEVERE_MARKERS.iter().any(|marker| text.contains(marker)) {
        Severity::Severe
    } else if MODERATE_MARKERS.iter().any(|marker| text.contains(marker)) {
        Severity::Moderate
    } else {
        Severity::Mild
    }
}

fn standing_recommendations() -> Vec<String> {
    vec![
        "Monitor symptoms closely".to_string(),
        "Consult a healthcare provider if symptoms persist or worsen".to_string(),
        "Maintain proper hydration and rest".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Gender;

    fn request(age: u8, symptoms: &str) -> AssessmentRequest {
        AssessmentRequest {
            name: "John Doe".to_string(),
            age,
            gender: Gender::Male,
            symptoms: symptoms.to_string(),
            medical_history: String::new(),
            current_medications: String::new(),
        }
    }

    #[test]
    fn dizziness_wins_primary_symptom_priority() {
        assert_eq!(
            extract_primary_symptom("chest pain and feeling dizzy"),
            "dizziness"
        );
        assert_eq!(extract_primary_symptom("crushing chest pain"), "chest pain");
        assert_eq!(extract_primary_symptom("my head hurts"), "headache");
        assert_eq!(extract_primary_symptom("itchy elbow"), "fatigue");
    }

    #[test]
    fn severity_markers_escalate_in_order() {
        assert_eq!(estimate_severity("unbearable pain"), Severity::Severe);
        assert_eq!(estimate_severity("a noticeable ache"), Severity::Moderate);
        assert_eq!(estimate_severity("slight sniffle"), Severity::Mild);
    }

    #[test]
    fn mild_single_symptom_adult_stays_routine() {
        let preview = TriageEngine::default().preview(&request(30, "a light cough since yesterday"));
        assert_eq!(preview.risk_score, 35);
        assert_eq!(preview.risk_level, RiskLevel::Low);
        assert_eq!(preview.urgency, Urgency::Routine);
        assert_eq!(preview.primary_symptom, "cough");
    }

    #[test]
    fn elderly_severe_multi_symptom_goes_urgent() {
        let preview = TriageEngine::default().preview(&request(
            78,
            "severe chest pain with shortness of breath and dizziness",
        ));
        assert_eq!(preview.risk_score, 100);
        assert_eq!(preview.risk_level, RiskLevel::High);
        assert_eq!(preview.urgency, Urgency::Urgent);
        assert_eq!(preview.primary_symptom, "dizziness");
    }

    #[test]
    fn score_is_clamped_to_one_hundred() {
        let preview = TriageEngine::default().preview(&request(
            90,
            "severe chest pain, shortness of breath, dizziness, headache, nausea, fatigue, fever, cough, abdominal pain",
        ));
        assert_eq!(preview.risk_score, 100);
    }

    #[test]
    fn preview_always_carries_standing_recommendations() {
        let preview = TriageEngine::default().preview(&request(40, "mild headache this morning"));
        assert_eq!(preview.recommendations.len(), 3);
    }
}
