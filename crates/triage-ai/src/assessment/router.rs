use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::form::{validate_form, RawAssessmentForm};
use super::gateway::AssessmentGateway;
use super::service::{AssessmentService, SubmissionError};

/// Router builder exposing the intake endpoints.
pub fn assessment_router<G>(service: Arc<AssessmentService<G>>) -> Router
where
    G: AssessmentGateway + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<G>))
        .route("/api/v1/assessments/validate", post(validate_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler<G>(
    State(service): State<Arc<AssessmentService<G>>>,
    Json(form): Json<RawAssessmentForm>,
) -> Response
where
    G: AssessmentGateway + 'static,
{
    match service.submit(&form).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => {
            warn!(%error, "assessment submission failed");
            let status = match &error {
                SubmissionError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SubmissionError::AlreadyInFlight => StatusCode::CONFLICT,
                SubmissionError::Transport(_)
                | SubmissionError::Server { .. }
                | SubmissionError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({ "error": error.to_string() });
            (status, Json(payload)).into_response()
        }
    }
}

/// Runs the aggregator alone so the UI can surface every invalid field at
/// once, without touching the assessment backend.
pub(crate) async fn validate_handler(Json(form): Json<RawAssessmentForm>) -> Response {
    let report = validate_form(&form);
    let payload = json!({
        "is_valid": report.is_valid(),
        "errors": report.errors,
    });
    (StatusCode::OK, Json(payload)).into_response()
}
