//! Span maker for the HTTP trace layer that keeps personal data out of logs.
//!
//! Subjects are addressed by opaque ids, but the identity directory is also
//! queried by e-mail address and roadside checks carry plate numbers. Those
//! path segments and sensitive query values are redacted before the URI is
//! recorded on the request span.

use axum::http::{Request, Uri};
use tower_http::trace::MakeSpan;
use tracing::Span;

const REDACTED: &str = "[REDACTED]";

/// Query parameter names whose values are never logged.
const SENSITIVE_PARAMS: &[&str] = &["token", "access_token", "email", "plate"];

/// Path segments following one of these are personal data.
const SENSITIVE_PREFIXES: &[&str] = &["email", "registration-by-plate"];

#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan {
    service: &'static str,
}

impl SanitizedMakeSpan {
    pub fn new(service: &'static str) -> Self {
        Self { service }
    }
}

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            service = self.service,
            method = %request.method(),
            uri = %sanitize_uri(request.uri()),
            version = ?request.version(),
        )
    }
}

fn sanitize_path(path: &str) -> String {
    let mut previous = "";
    path.split('/')
        .map(|segment| {
            let redact = segment.contains('@') || SENSITIVE_PREFIXES.contains(&previous);
            previous = segment;
            if redact && !segment.is_empty() {
                REDACTED
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn sanitize_uri(uri: &Uri) -> String {
    let path = sanitize_path(uri.path());
    let query = match uri.query() {
        Some(q) => q,
        None => return path,
    };

    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}={REDACTED}")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", path, pairs.join("&"))
}
