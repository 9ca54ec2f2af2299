use async_trait::async_trait;

use super::domain::AssessmentRequest;

/// Raw reply captured from the assessment endpoint, before interpretation.
///
/// The gateway deliberately does not inspect status, content type, or body;
/// classifying them is the submission pipeline's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Failure to carry the request to the endpoint at all (DNS, refused
/// connection, reset mid-response).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("assessment endpoint unreachable: {0}")]
    Unreachable(String),
}

/// Outbound boundary to the assessment endpoint, kept behind a trait so the
/// submission flow can be exercised without a live backend.
#[async_trait]
pub trait AssessmentGateway: Send + Sync {
    async fn send(&self, payload: &AssessmentRequest) -> Result<GatewayReply, GatewayError>;
}

/// reqwest-backed gateway POSTing the canonical payload as JSON.
#[derive(Debug, Clone)]
pub struct HttpAssessmentGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAssessmentGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AssessmentGateway for HttpAssessmentGateway {
    async fn send(&self, payload: &AssessmentRequest) -> Result<GatewayReply, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|err| GatewayError::Unreachable(err.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::Unreachable(err.to_string()))?;

        Ok(GatewayReply {
            status,
            content_type,
            body,
        })
    }
}
