use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::Gender;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const AGE_MIN: u8 = 1;
pub const AGE_MAX: u8 = 120;
pub const SYMPTOMS_MIN_CHARS: usize = 10;
pub const SYMPTOMS_MAX_CHARS: usize = 1000;
pub const OPTIONAL_MAX_CHARS: usize = 500;

/// Untrusted intake form as posted by the UI layer.
///
/// Every field tolerates being absent, and numeric values are accepted
/// wherever the UI may send either `"30"` or `30`. Values of any other JSON
/// type collapse to `None` so downstream steps never see a non-string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAssessmentForm {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub symptoms: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub medical_history: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub current_medications: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}

/// Fields checked by the intake validators, in the order they appear on the
/// form. The derived `Ord` follows declaration order, which keeps error maps
/// and "first error" selection deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Age,
    Gender,
    Symptoms,
}

impl FormField {
    pub const fn label(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Age => "age",
            FormField::Gender => "gender",
            FormField::Symptoms => "symptoms",
        }
    }

    const fn display_name(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Age => "Age",
            FormField::Gender => "Gender",
            FormField::Symptoms => "Symptoms",
        }
    }
}

/// Rule violations reported by the individual field validators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldViolation {
    #[error("must be at least {min} characters")]
    TooShort { min: usize },
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
    #[error("must be a whole number between {min} and {max}")]
    OutOfRange { min: u8, max: u8 },
    #[error("is required")]
    Missing,
    #[error("may only use letters, spaces or hyphens")]
    UnsupportedCharacters,
    #[error("is not one of the offered choices")]
    Unrecognized,
}

/// Aggregated verdict across every checked intake field.
///
/// Only the first violated rule is retained per field, and every field is
/// checked in a single pass so the UI can surface all problems at once. A
/// report is created fresh per attempt and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<FormField, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First recorded error in form order, if any.
    pub fn first_error(&self) -> Option<(FormField, &str)> {
        self.errors
            .iter()
            .next()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Check the patient's name: trimmed, 2 to 100 characters, letters, spaces
/// and hyphens only.
pub fn validate_name(raw: Option<&str>) -> Result<(), FieldViolation> {
    let trimmed = raw.unwrap_or_default().trim();
    let length = trimmed.chars().count();
    if length < NAME_MIN_CHARS {
        return Err(FieldViolation::TooShort { min: NAME_MIN_CHARS });
    }
    if length > NAME_MAX_CHARS {
        return Err(FieldViolation::TooLong { max: NAME_MAX_CHARS });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
    {
        return Err(FieldViolation::UnsupportedCharacters);
    }
    Ok(())
}

/// Check the age field. Absent, unparsable, zero, negative, and values above
/// 120 all report the same out-of-range violation.
pub fn validate_age(raw: Option<&str>) -> Result<(), FieldViolation> {
    let parsed = raw.and_then(|value| value.trim().parse::<i64>().ok());
    match parsed {
        Some(age) if (i64::from(AGE_MIN)..=i64::from(AGE_MAX)).contains(&age) => Ok(()),
        _ => Err(FieldViolation::OutOfRange {
            min: AGE_MIN,
            max: AGE_MAX,
        }),
    }
}

/// Check the gender selection against the published set.
pub fn validate_gender(raw: Option<&str>) -> Result<(), FieldViolation> {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::Missing);
    }
    if Gender::parse(trimmed).is_none() {
        return Err(FieldViolation::Unrecognized);
    }
    Ok(())
}

/// Check the free-text symptom description: trimmed, 10 to 1000 characters.
pub fn validate_symptoms(raw: Option<&str>) -> Result<(), FieldViolation> {
    let length = raw.unwrap_or_default().trim().chars().count();
    if length < SYMPTOMS_MIN_CHARS {
        return Err(FieldViolation::TooShort {
            min: SYMPTOMS_MIN_CHARS,
        });
    }
    if length > SYMPTOMS_MAX_CHARS {
        return Err(FieldViolation::TooLong {
            max: SYMPTOMS_MAX_CHARS,
        });
    }
    Ok(())
}

/// Run every field validator over the raw form and collect one report.
///
/// Medical history and current medications are optional and are only ever
/// sanitized, never validated.
pub fn validate_form(form: &RawAssessmentForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    let checks = [
        (FormField::Name, validate_name(form.name.as_deref())),
        (FormField::Age, validate_age(form.age.as_deref())),
        (FormField::Gender, validate_gender(form.gender.as_deref())),
        (
            FormField::Symptoms,
            validate_symptoms(form.symptoms.as_deref()),
        ),
    ];

    for (field, verdict) in checks {
        if let Err(violation) = verdict {
            report
                .errors
                .insert(field, format!("{} {}", field.display_name(), violation));
        }
    }

    report
}
