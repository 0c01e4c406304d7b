//! Authenticated calls to peer services
//!
//! Every outbound request forwards the caller's bearer token unchanged and is
//! bounded by what is left of the inbound request's [`Deadline`]. Failures are
//! returned as a [`ClientError`]; a remote failure never panics.

pub mod court;
pub mod deadline;
pub mod error;
pub mod identity;
pub mod mup;
pub mod police;

pub use court::{CourtClient, CrimeReportSink, WarrantLookup};
pub use deadline::Deadline;
pub use error::{classify, ClientError, TransportFailure};
pub use identity::{IdentityClient, PersonDirectory};
pub use mup::{DrivingBanNotifier, MupClient, MupRegistry};
pub use police::{PoliceClient, ViolationSource};

use crate::config::OutboundConfig;
use anyhow::Context;
use metrics::{counter, histogram};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// HTTP client bound to one peer service
#[derive(Clone)]
pub struct ServiceClient {
    peer: &'static str,
    base_url: String,
    http_client: Client,
}

impl ServiceClient {
    /// Create a client for `peer` rooted at `base_url`
    pub fn new(
        peer: &'static str,
        base_url: impl Into<String>,
        config: &OutboundConfig,
    ) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(peer, base_url, http_client))
    }

    pub fn with_client(peer: &'static str, base_url: impl Into<String>, http_client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            peer,
            base_url,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue a request and decode the body of the `expected` response.
    pub async fn call<B, T>(
        &self,
        deadline: &Deadline,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: &str,
        expected: StatusCode,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let started = Instant::now();

        let result = self
            .execute(deadline, &method, &url, body, token, expected)
            .await
            .and_then(|bytes| decode(&method, &url, &bytes));

        self.record(&method, &url, started, &result);
        result
    }

    /// Issue a request whose response body carries nothing the caller needs.
    pub async fn call_ack<B>(
        &self,
        deadline: &Deadline,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: &str,
        expected: StatusCode,
    ) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path);
        let started = Instant::now();

        let result = self
            .execute(deadline, &method, &url, body, token, expected)
            .await
            .map(|_| ());

        self.record(&method, &url, started, &result);
        result
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        deadline: &Deadline,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        self.call(deadline, Method::GET, path, None::<&()>, token, StatusCode::OK)
            .await
    }

    async fn execute<B>(
        &self,
        deadline: &Deadline,
        method: &Method,
        url: &str,
        body: Option<&B>,
        token: &str,
        expected: StatusCode,
    ) -> Result<Vec<u8>, ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        // Taken before the request goes out so a timeout reports this budget.
        let max_timeout = deadline.max_timeout();

        if token.trim().is_empty() {
            return Err(ClientError::Unknown {
                cause: "bearer token is empty".to_string(),
            });
        }
        if deadline.is_expired() {
            return Err(classify(
                TransportFailure::DeadlineElapsed,
                method,
                url,
                max_timeout,
            ));
        }

        let mut request = self
            .http_client
            .request(method.clone(), url)
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = within(deadline, request.send())
            .await
            .map_err(|failure| classify(failure, method, url, max_timeout))?;

        let status = response.status();
        if status != expected {
            return Err(ClientError::Response {
                url: url.to_string(),
                method: method.clone(),
                status,
            });
        }

        let bytes = within(deadline, response.bytes())
            .await
            .map_err(|failure| classify(failure, method, url, max_timeout))?;

        Ok(bytes.to_vec())
    }

    fn record<T>(
        &self,
        method: &Method,
        url: &str,
        started: Instant,
        result: &Result<T, ClientError>,
    ) {
        let outcome = match result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        counter!("uprava_outbound_requests_total", "peer" => self.peer, "outcome" => outcome)
            .increment(1);
        histogram!("uprava_outbound_request_duration_seconds", "peer" => self.peer)
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(_) => tracing::debug!(peer = self.peer, %method, url, "Outbound request succeeded"),
            Err(e) => tracing::warn!(
                peer = self.peer,
                %method,
                url,
                kind = e.kind(),
                error = %e,
                "Outbound request failed"
            ),
        }
    }
}

/// Await `future`, giving up once the deadline passes.
async fn within<F, T>(deadline: &Deadline, future: F) -> Result<T, TransportFailure>
where
    F: Future<Output = Result<T, reqwest::Error>>,
{
    match deadline.remaining() {
        Some(budget) => match tokio::time::timeout(budget, future).await {
            Ok(result) => result.map_err(TransportFailure::from),
            Err(_) => Err(TransportFailure::DeadlineElapsed),
        },
        None => future.await.map_err(TransportFailure::from),
    }
}

fn decode<T: DeserializeOwned>(method: &Method, url: &str, bytes: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(bytes).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        method: method.clone(),
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ack {
        id: String,
    }

    fn client_for(server: &MockServer) -> ServiceClient {
        ServiceClient::with_client("test", server.uri(), Client::new())
    }

    #[tokio::test]
    async fn test_call_forwards_bearer_token_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/driving-ban"))
            .and(header("authorization", "Bearer token-123"))
            .and(body_json(json!({"reason": "x"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "b1"})))
            .expect(1)
            .mount(&server)
            .await;

        let ack: Ack = client_for(&server)
            .call(
                &Deadline::after(Duration::from_secs(2)),
                Method::POST,
                "/driving-ban",
                Some(&json!({"reason": "x"})),
                "token-123",
                StatusCode::CREATED,
            )
            .await
            .unwrap();

        assert_eq!(ack, Ack { id: "b1".to_string() });
    }

    #[tokio::test]
    async fn test_unexpected_success_status_is_response_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/driving-ban"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "b1"})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .call::<_, Ack>(
                &Deadline::unbounded(),
                Method::POST,
                "/driving-ban",
                Some(&json!({})),
                "t",
                StatusCode::CREATED,
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ClientError::Response {
                url: format!("{}/driving-ban", server.uri()),
                method: Method::POST,
                status: StatusCode::OK,
            }
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get::<Ack>(&Deadline::unbounded(), "/thing", "t")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_bounded_deadline_elapsing_is_client_side_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get::<Ack>(&Deadline::after(Duration::from_millis(50)), "/slow", "t")
            .await
            .unwrap_err();

        match err {
            ClientError::ClientSideTimeout {
                method,
                max_timeout,
                ..
            } => {
                assert_eq!(method, Method::GET);
                assert!(max_timeout > Duration::ZERO);
                assert!(max_timeout <= Duration::from_millis(50));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_without_deadline_is_connecting() {
        // Bind and drop to obtain a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ServiceClient::with_client("test", format!("http://{}", addr), Client::new());
        let err = client
            .get::<Ack>(&Deadline::unbounded(), "/anything", "t")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Connecting { .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get::<Ack>(&Deadline::unbounded(), "/thing", "  ")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Unknown { .. }));
    }

    #[tokio::test]
    async fn test_expired_deadline_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let expired = Deadline::after(Duration::ZERO);
        let err = client_for(&server)
            .call_ack(&expired, Method::GET, "/thing", None::<&()>, "t", StatusCode::OK)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ClientSideTimeout { .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ServiceClient::with_client("court", "http://court:8000/", Client::new());
        assert_eq!(client.url("/warrants/p-1"), "http://court:8000/warrants/p-1");
        assert_eq!(client.url("warrants"), "http://court:8000/warrants");
    }
}
