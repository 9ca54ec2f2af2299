pub mod domain;
pub mod form;
pub mod gateway;
pub mod router;
pub mod sanitize;
pub mod service;
pub mod triage;

pub use domain::{AssessmentOutcome, AssessmentRequest, Gender, RiskLevel, Urgency};
pub use form::{validate_form, FieldViolation, FormField, RawAssessmentForm, ValidationReport};
pub use gateway::{AssessmentGateway, GatewayError, GatewayReply, HttpAssessmentGateway};
pub use router::assessment_router;
pub use sanitize::sanitize_form;
pub use service::{AssessmentService, SubmissionError};
pub use triage::{Severity, TriageEngine, TriagePreview, TriageRules};
