//! Outbound call failures and their classification

use reqwest::{Method, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Every way an outbound peer call can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The deadline passed before a response arrived. A zero `max_timeout`
    /// means the call had no deadline of its own.
    #[error("{method} {url} timed out (max timeout {max_timeout:?})")]
    ClientSideTimeout {
        url: String,
        method: Method,
        max_timeout: Duration,
    },

    #[error("failed to connect: {cause}")]
    Connecting { cause: String },

    #[error("request failed: {cause}")]
    Unknown { cause: String },

    /// The peer answered with a status other than the declared success code.
    #[error("{method} {url} answered {status}")]
    Response {
        url: String,
        method: Method,
        status: StatusCode,
    },

    #[error("failed to decode response of {method} {url}: {cause}")]
    Decode {
        url: String,
        method: Method,
        cause: String,
    },
}

impl ClientError {
    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::ClientSideTimeout { .. } => "timeout",
            ClientError::Connecting { .. } => "connect",
            ClientError::Unknown { .. } => "unknown",
            ClientError::Response { .. } => "status",
            ClientError::Decode { .. } => "decode",
        }
    }

    /// Status the peer answered with, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Raw cause of a failed attempt, before classification.
#[derive(Debug)]
pub enum TransportFailure {
    /// The caller's own deadline elapsed while waiting.
    DeadlineElapsed,
    /// The HTTP client gave up on its own timer.
    TimedOut(String),
    /// Connection refused, reset, DNS or TLS failure, broken body stream.
    Network(String),
    /// The request could not be built or was never valid.
    Malformed(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        let cause = describe(&err);
        if err.is_timeout() {
            TransportFailure::TimedOut(cause)
        } else if err.is_builder() {
            TransportFailure::Malformed(cause)
        } else {
            TransportFailure::Network(cause)
        }
    }
}

/// Map a failed attempt to exactly one error kind.
///
/// `max_timeout` is the budget that was left when the call was issued, or
/// zero for a call without deadline.
pub fn classify(
    failure: TransportFailure,
    method: &Method,
    url: &str,
    max_timeout: Duration,
) -> ClientError {
    match failure {
        TransportFailure::DeadlineElapsed | TransportFailure::TimedOut(_) => {
            ClientError::ClientSideTimeout {
                url: url.to_string(),
                method: method.clone(),
                max_timeout,
            }
        }
        TransportFailure::Network(cause) => ClientError::Connecting { cause },
        TransportFailure::Malformed(cause) => ClientError::Unknown { cause },
    }
}

/// Flatten an error and its sources into one line.
fn describe(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://mup:8000/driving-ban";

    #[test]
    fn test_deadline_elapsed_is_client_side_timeout() {
        let err = classify(
            TransportFailure::DeadlineElapsed,
            &Method::POST,
            URL,
            Duration::from_millis(250),
        );
        assert_eq!(
            err,
            ClientError::ClientSideTimeout {
                url: URL.to_string(),
                method: Method::POST,
                max_timeout: Duration::from_millis(250),
            }
        );
    }

    #[test]
    fn test_transport_timeout_without_deadline_reports_zero() {
        let err = classify(
            TransportFailure::TimedOut("operation timed out".to_string()),
            &Method::GET,
            URL,
            Duration::ZERO,
        );
        assert!(matches!(
            err,
            ClientError::ClientSideTimeout { max_timeout, .. } if max_timeout == Duration::ZERO
        ));
    }

    #[test]
    fn test_network_failure_is_connecting() {
        let err = classify(
            TransportFailure::Network("connection refused".to_string()),
            &Method::GET,
            URL,
            Duration::ZERO,
        );
        assert_eq!(
            err,
            ClientError::Connecting {
                cause: "connection refused".to_string()
            }
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_malformed_request_is_unknown() {
        let err = classify(
            TransportFailure::Malformed("relative URL without a base".to_string()),
            &Method::GET,
            "not a url",
            Duration::from_secs(4),
        );
        assert!(matches!(err, ClientError::Unknown { .. }));
        assert_eq!(err.kind(), "unknown");
    }

    #[test]
    fn test_response_error_carries_status() {
        let err = ClientError::Response {
            url: URL.to_string(),
            method: Method::POST,
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("POST {} answered 404 Not Found", URL));
    }
}
