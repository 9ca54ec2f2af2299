use super::domain::{AssessmentRequest, Gender};
use super::form::{RawAssessmentForm, OPTIONAL_MAX_CHARS};

/// Normalize a validated raw form into the canonical request payload.
///
/// Sanitization trusts that [`super::form::validate_form`] has already
/// passed; it does not re-check any rule, but it must never panic on
/// unexpected input either. The operation is idempotent: feeding the output
/// back through produces an identical payload.
pub fn sanitize_form(form: &RawAssessmentForm) -> AssessmentRequest {
    AssessmentRequest {
        name: clean_text(form.name.as_deref()),
        // Parse failures collapse to 0; validation rejects that value upstream.
        age: form
            .age
            .as_deref()
            .and_then(|value| value.trim().parse::<u8>().ok())
            .unwrap_or(0),
        gender: form
            .gender
            .as_deref()
            .and_then(Gender::parse)
            .unwrap_or_default(),
        symptoms: clean_text(form.symptoms.as_deref()),
        medical_history: clamp_chars(clean_text(form.medical_history.as_deref())),
        current_medications: clamp_chars(clean_text(form.current_medications.as_deref())),
    }
}

fn clean_text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_string()
}

fn clamp_chars(text: String) -> String {
    if text.chars().count() <= OPTIONAL_MAX_CHARS {
        text
    } else {
        text.chars().take(OPTIONAL_MAX_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from(payload: &AssessmentRequest) -> RawAssessmentForm {
        RawAssessmentForm {
            name: Some(payload.name.clone()),
            age: Some(payload.age.to_string()),
            gender: Some(payload.gender.label().to_string()),
            symptoms: Some(payload.symptoms.clone()),
            medical_history: Some(payload.medical_history.clone()),
            current_medications: Some(payload.current_medications.clone()),
        }
    }

    #[test]
    fn canonical_example_round_trips() {
        let form = RawAssessmentForm {
            name: Some("John Doe".to_string()),
            age: Some("30".to_string()),
            gender: Some("male".to_string()),
            symptoms: Some("Headaches and fatigue for a week".to_string()),
            medical_history: None,
            current_medications: None,
        };

        let payload = sanitize_form(&form);
        assert_eq!(
            payload,
            AssessmentRequest {
                name: "John Doe".to_string(),
                age: 30,
                gender: Gender::Male,
                symptoms: "Headaches and fatigue for a week".to_string(),
                medical_history: String::new(),
                current_medications: String::new(),
            }
        );
    }

    #[test]
    fn whitespace_is_stripped_from_every_string_field() {
        let form = RawAssessmentForm {
            name: Some("  John Doe \n".to_string()),
            age: Some(" 30 ".to_string()),
            gender: Some(" male ".to_string()),
            symptoms: Some("\tHeadaches and fatigue for a week  ".to_string()),
            medical_history: Some("  asthma ".to_string()),
            current_medications: Some(" none  ".to_string()),
        };

        let payload = sanitize_form(&form);
        assert_eq!(payload.name, "John Doe");
        assert_eq!(payload.age, 30);
        assert_eq!(payload.symptoms, "Headaches and fatigue for a week");
        assert_eq!(payload.medical_history, "asthma");
        assert_eq!(payload.current_medications, "none");
    }

    #[test]
    fn unparsable_age_defaults_to_zero() {
        let mut form = RawAssessmentForm::default();
        form.age = Some("thirty".to_string());
        assert_eq!(sanitize_form(&form).age, 0);

        form.age = None;
        assert_eq!(sanitize_form(&form).age, 0);
    }

    #[test]
    fn unrecognized_gender_collapses_to_prefer_not_to_say() {
        let mut form = RawAssessmentForm::default();
        form.gender = Some("unsure".to_string());
        assert_eq!(sanitize_form(&form).gender, Gender::PreferNotToSay);
    }

    #[test]
    fn absent_optional_fields_become_empty_strings() {
        let payload = sanitize_form(&RawAssessmentForm::default());
        assert_eq!(payload.medical_history, "");
        assert_eq!(payload.current_medications, "");
    }

    #[test]
    fn oversized_optional_fields_are_clamped() {
        let mut form = RawAssessmentForm::default();
        form.medical_history = Some("x".repeat(600));
        let payload = sanitize_form(&form);
        assert_eq!(payload.medical_history.chars().count(), 500);
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let form = RawAssessmentForm {
            name: Some("  Anne-Marie  ".to_string()),
            age: Some("47".to_string()),
            gender: Some("FEMALE".to_string()),
            symptoms: Some(" persistent dry cough at night ".to_string()),
            medical_history: Some("  hypertension ".to_string()),
            current_medications: Some("lisinopril".to_string()),
        };

        let once = sanitize_form(&form);
        let twice = sanitize_form(&raw_from(&once));
        assert_eq!(once, twice);
    }
}
