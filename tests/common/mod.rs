//! Shared helpers for the HTTP router tests
//!
//! Routers are built with the production `build_router()`; every peer URL
//! points at a wiremock server so outbound calls can be stubbed per test.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use uprava_core::config::{
    Config, CourtConfig, JwtConfig, OutboundConfig, PeerConfig, TelemetryConfig,
};
use uprava_core::server::{build_router, ServiceKind};
use wiremock::MockServer;

pub const TEST_SECRET: &str = "test-secret-key-for-http-testing";

/// Config whose peers all resolve to `peer_url`
pub fn test_config(peer_url: &str) -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        request_timeout_secs: 10,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            leeway_secs: 5,
        },
        outbound: OutboundConfig {
            timeout_ms: 2000,
            connect_timeout_ms: 500,
        },
        peers: PeerConfig {
            court_url: Some(peer_url.to_string()),
            mup_url: Some(peer_url.to_string()),
            police_url: Some(peer_url.to_string()),
            identity_url: Some(peer_url.to_string()),
        },
        court: CourtConfig {
            name: "Misdemeanor Court Novi Sad".to_string(),
            hearing_delay_hours: 72,
        },
        telemetry: TelemetryConfig::default(),
    }
}

/// Start a peer stub and build the router for `kind` against it
pub async fn test_app(kind: ServiceKind) -> (Router, MockServer) {
    let peers = MockServer::start().await;
    let app = build_router(kind, &test_config(&peers.uri()), None).unwrap();
    (app, peers)
}

pub fn token(subject: &str, role: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": subject,
            "role": role,
            "exp": Utc::now().timestamp() + 3600,
        }),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token("admin-1", "ADMIN")
}

pub fn user_token(subject: &str) -> String {
    token(subject, "USER")
}

/// Send a request and parse the JSON body, if any
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn get_json(app: &Router, path: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, path, Some(token), None).await
}

pub async fn post_json(app: &Router, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, path, Some(token), Some(body)).await
}

pub async fn put_json(app: &Router, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, path, Some(token), Some(body)).await
}

pub async fn delete_json(app: &Router, path: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, path, Some(token), None).await
}
