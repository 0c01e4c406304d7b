//! Per-request deadline stamping
//!
//! Every inbound request gets a [`Deadline`] covering all outbound calls made
//! while handling it. Handlers take it as an extractor and pass it down, so
//! a later call only gets what earlier calls left over.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::time::Duration;

use crate::client::Deadline;

/// Stamp the request with a deadline `budget` from now.
pub async fn deadline_middleware(
    State(budget): State<Duration>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(Deadline::after(budget));
    next.run(request).await
}

impl<S> FromRequestParts<S> for Deadline
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Deadline>()
            .copied()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    async fn report(deadline: Deadline) -> String {
        match deadline.remaining() {
            Some(left) if left <= Duration::from_secs(4) => "bounded".to_string(),
            Some(_) => "too long".to_string(),
            None => "unbounded".to_string(),
        }
    }

    async fn call(app: Router) -> String {
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[tokio::test]
    async fn test_middleware_bounds_the_request() {
        let app = Router::new().route("/", get(report)).layer(
            axum::middleware::from_fn_with_state(Duration::from_secs(4), deadline_middleware),
        );
        assert_eq!(call(app).await, "bounded");
    }

    #[tokio::test]
    async fn test_without_middleware_deadline_is_unbounded() {
        let app = Router::new().route("/", get(report));
        assert_eq!(call(app).await, "unbounded");
    }
}
