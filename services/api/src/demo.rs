use clap::Args;
use triage_ai::assessment::{
    sanitize_form, validate_form, RawAssessmentForm, SubmissionError, TriageEngine,
};
use triage_ai::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Patient name
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Patient age in years
    #[arg(long)]
    pub(crate) age: Option<String>,
    /// One of male, female, other, prefer-not-to-say
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Free-text symptom description (at least 10 characters)
    #[arg(long)]
    pub(crate) symptoms: Option<String>,
    /// Relevant medical history, if any
    #[arg(long)]
    pub(crate) medical_history: Option<String>,
    /// Current medications, if any
    #[arg(long)]
    pub(crate) current_medications: Option<String>,
}

/// Offline walk through the intake pipeline: validation report, canonical
/// payload, and the local triage preview. Submission to the assessment
/// backend happens through the HTTP service, not this command.
pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        name,
        age,
        gender,
        symptoms,
        medical_history,
        current_medications,
    } = args;

    let form = RawAssessmentForm {
        name,
        age,
        gender,
        symptoms,
        medical_history,
        current_medications,
    };

    let report = validate_form(&form);
    if !report.is_valid() {
        println!("Symptom report is not ready to submit:");
        for (field, message) in &report.errors {
            println!("- {}: {}", field.label(), message);
        }

        let (field, message) = report.first_error().expect("invalid report has an error");
        return Err(AppError::from(SubmissionError::Validation {
            field,
            message: message.to_string(),
        }));
    }

    let payload = sanitize_form(&form);
    let preview = TriageEngine::default().preview(&payload);

    println!("Canonical payload");
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).expect("payload serializes")
    );

    println!("\nLocal triage preview (not a medical assessment)");
    println!("- primary symptom: {}", preview.primary_symptom);
    println!("- estimated severity: {}", preview.severity.label());
    println!(
        "- risk score: {} ({})",
        preview.risk_score,
        preview.risk_level.label()
    );
    println!("- urgency: {}", preview.urgency.label());
    for recommendation in &preview.recommendations {
        println!("- {recommendation}");
    }

    Ok(())
}
