//! Operational endpoints: health, ping and Prometheus metrics

use super::MessageResponse;
use crate::middleware::Caller;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// Health check body for `service`
pub fn health(service: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: service.to_string(),
    })
}

/// Authenticated liveness probe used by peer services
pub async fn ping(caller: Caller) -> Json<MessageResponse> {
    tracing::debug!(subject = %caller.subject, role = %caller.role, "Ping");
    Json(MessageResponse::new("pong"))
}

/// Prometheus text exposition; 404 when metrics are disabled
pub async fn metrics(State(handle): State<Option<PrometheusHandle>>) -> impl IntoResponse {
    match handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "Metrics not enabled".to_string()),
    }
}
