use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;

use super::domain::AssessmentOutcome;
use super::form::{validate_form, FormField, RawAssessmentForm};
use super::gateway::{AssessmentGateway, GatewayError, GatewayReply};
use super::sanitize::sanitize_form;

/// Errors surfaced by the submission pipeline.
///
/// Every variant is returned to the immediate caller; the pipeline never
/// retries, logs, or swallows. Presentation is the caller's concern.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// A required field failed a local rule; nothing was transmitted. Carries
    /// the first error in form order even when several fields are invalid.
    #[error("{message}")]
    Validation { field: FormField, message: String },
    /// The network call could not complete; no response was received.
    #[error("assessment request could not be delivered: {0}")]
    Transport(String),
    /// A response arrived with a failure status. The message follows the
    /// body's `error` field, then `message`, then the status line.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// A response arrived but was not the canonical structured shape.
    #[error("assessment reply was not understood: {detail}")]
    MalformedResponse { detail: String },
    /// This service instance already has a submission pending.
    #[error("an assessment submission is already in progress")]
    AlreadyInFlight,
}

/// Sequences validation, sanitization, and transmission for one submission.
///
/// A service instance refuses overlapping submissions: the pending flag is
/// claimed before any work starts and released when the attempt resolves,
/// successful or not. Each accepted submission issues exactly one gateway
/// call.
pub struct AssessmentService<G> {
    gateway: Arc<G>,
    in_flight: AtomicBool,
}

impl<G> AssessmentService<G>
where
    G: AssessmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the full pipeline for one raw form.
    pub async fn submit(
        &self,
        form: &RawAssessmentForm,
    ) -> Result<AssessmentOutcome, SubmissionError> {
        let _slot = self.claim_slot()?;

        let report = validate_form(form);
        if let Some((field, message)) = report.first_error() {
            return Err(SubmissionError::Validation {
                field,
                message: message.to_string(),
            });
        }

        let payload = sanitize_form(form);
        let reply = self.gateway.send(&payload).await.map_err(|err| {
            let GatewayError::Unreachable(detail) = err;
            SubmissionError::Transport(detail)
        })?;

        interpret_reply(reply)
    }

    fn claim_slot(&self) -> Result<InFlightSlot<'_>, SubmissionError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmissionError::AlreadyInFlight);
        }
        Ok(InFlightSlot {
            flag: &self.in_flight,
        })
    }
}

/// Releases the pending flag on every exit path, including early returns.
struct InFlightSlot<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn interpret_reply(reply: GatewayReply) -> Result<AssessmentOutcome, SubmissionError> {
    if !is_structured(reply.content_type.as_deref()) {
        return Err(SubmissionError::MalformedResponse {
            detail: match reply.content_type {
                Some(content_type) => format!("unexpected content type '{content_type}'"),
                None => "missing content type".to_string(),
            },
        });
    }

    if !(200..300).contains(&reply.status) {
        return Err(SubmissionError::Server {
            status: reply.status,
            message: server_message(reply.status, &reply.body),
        });
    }

    serde_json::from_str::<AssessmentOutcome>(&reply.body)
        .map_err(|err| SubmissionError::MalformedResponse {
            detail: err.to_string(),
        })
}

fn is_structured(content_type: Option<&str>) -> bool {
    let Some(parsed) = content_type.and_then(|value| value.parse::<mime::Mime>().ok()) else {
        return false;
    };
    parsed.type_() == mime::APPLICATION
        && (parsed.subtype() == mime::JSON || parsed.suffix() == Some(mime::JSON))
}

fn server_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }

    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("unknown status");
    format!("HTTP {status} {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{RiskLevel, Urgency};

    fn json_reply(status: u16, body: &str) -> GatewayReply {
        GatewayReply {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_reply_parses_into_canonical_outcome() {
        let body = serde_json::json!({
            "risk_level": "Moderate",
            "risk_score": 55,
            "urgency": "Monitor",
            "clinical_reasoning": "persistent symptoms warrant follow-up",
            "recommendations": ["see a clinician"],
            "red_flags": [],
            "confidence_score": 0.8,
        })
        .to_string();

        let outcome = interpret_reply(json_reply(200, &body)).expect("outcome parses");
        assert_eq!(outcome.risk_level, RiskLevel::Moderate);
        assert_eq!(outcome.urgency, Urgency::Monitor);
    }

    #[test]
    fn error_field_takes_precedence_over_message() {
        let reply = json_reply(429, r#"{"error": "rate limited", "message": "slow down"}"#);
        match interpret_reply(reply) {
            Err(SubmissionError::Server { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn message_field_is_used_when_error_is_absent() {
        let reply = json_reply(500, r#"{"message": "backend exploded"}"#);
        match interpret_reply(reply) {
            Err(SubmissionError::Server { message, .. }) => {
                assert_eq!(message, "backend exploded");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_failure_body_falls_back_to_status_line() {
        let reply = json_reply(503, "<html>busy</html>");
        match interpret_reply(reply) {
            Err(SubmissionError::Server { message, .. }) => {
                assert_eq!(message, "HTTP 503 Service Unavailable");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_content_type_is_malformed_even_on_success_status() {
        let reply = GatewayReply {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: "<html>ok</html>".to_string(),
        };
        assert!(matches!(
            interpret_reply(reply),
            Err(SubmissionError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn json_content_type_parameters_are_tolerated() {
        let reply = GatewayReply {
            status: 422,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: r#"{"error": "bad payload"}"#.to_string(),
        };
        match interpret_reply(reply) {
            Err(SubmissionError::Server { message, .. }) => assert_eq!(message, "bad payload"),
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn success_status_with_unexpected_shape_is_malformed() {
        let reply = json_reply(200, r#"{"completely": "different"}"#);
        assert!(matches!(
            interpret_reply(reply),
            Err(SubmissionError::MalformedResponse { .. })
        ));
    }
}
