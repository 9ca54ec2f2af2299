use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use triage_ai::assessment::{AssessmentService, HttpAssessmentGateway};
use triage_ai::config::AssessmentConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the production gateway to the configured endpoint. The endpoint is
/// fixed at construction; nothing re-reads the environment per submission.
pub(crate) fn assessment_service(
    config: &AssessmentConfig,
) -> Arc<AssessmentService<HttpAssessmentGateway>> {
    let gateway = Arc::new(HttpAssessmentGateway::new(config.endpoint.clone()));
    Arc::new(AssessmentService::new(gateway))
}
