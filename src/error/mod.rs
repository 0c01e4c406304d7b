//! Unified error handling for the traffic enforcement services

use crate::client::ClientError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A peer service could not be reached or answered unexpectedly.
    #[error("Upstream error: {0}")]
    Upstream(#[from] ClientError),

    /// The suspension was stored but its driving ban was not created.
    #[error("Suspension {suspension_id} stored but driving ban cascade failed: {source}")]
    Cascade {
        suspension_id: String,
        source: ClientError,
    },

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

/// Status, error code and details for a peer failure
fn upstream_parts(err: &ClientError) -> (StatusCode, &'static str, Option<serde_json::Value>) {
    match err {
        ClientError::ClientSideTimeout {
            url,
            method,
            max_timeout,
        } => (
            StatusCode::GATEWAY_TIMEOUT,
            "upstream_timeout",
            Some(json!({
                "url": url,
                "method": method.as_str(),
                "max_timeout_ms": max_timeout.as_millis() as u64,
            })),
        ),
        ClientError::Connecting { .. } => (StatusCode::BAD_GATEWAY, "upstream_unavailable", None),
        ClientError::Unknown { .. } => (StatusCode::BAD_GATEWAY, "upstream_error", None),
        ClientError::Response {
            url,
            method,
            status,
        } => (
            StatusCode::BAD_GATEWAY,
            "upstream_rejected",
            Some(json!({
                "url": url,
                "method": method.as_str(),
                "status": status.as_u16(),
            })),
        ),
        ClientError::Decode { url, method, .. } => (
            StatusCode::BAD_GATEWAY,
            "upstream_decode",
            Some(json!({ "url": url, "method": method.as_str() })),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None)
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone(), None)
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                msg.clone(),
                None,
            ),
            AppError::Upstream(e) => {
                tracing::error!(kind = e.kind(), "Upstream error: {}", e);
                let (status, code, details) = upstream_parts(e);
                (
                    status,
                    code,
                    "Error with services communication".to_string(),
                    details,
                )
            }
            AppError::Cascade {
                suspension_id,
                source,
            } => {
                tracing::error!(
                    suspension_id = %suspension_id,
                    kind = source.kind(),
                    "Driving ban cascade failed: {}",
                    source
                );
                (
                    StatusCode::BAD_GATEWAY,
                    "cascade_failed",
                    "Suspension was stored but the driving ban could not be issued".to_string(),
                    Some(json!({
                        "suspension_id": suspension_id,
                        "cause": source.kind(),
                    })),
                )
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    "jwt_error",
                    "Invalid or expired token".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
