//! Role-based admission for route groups
//!
//! Each route group is wrapped with a [`RoleGate`] listing the roles it
//! admits. A request either passes with a [`Caller`] stored in its extensions
//! or is answered with 401 (no usable identity) or 403 (role not allowed).

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use metrics::counter;
use std::sync::Arc;

use super::auth::{extract_bearer_token, AuthError, Caller};
use crate::domain::Role;
use crate::jwt::JwtManager;

/// Allow-list of roles for a route group
#[derive(Clone)]
pub struct RoleGate {
    jwt_manager: JwtManager,
    allowed: Arc<[Role]>,
}

impl RoleGate {
    pub fn new(jwt_manager: JwtManager, allowed: &[Role]) -> Self {
        Self {
            jwt_manager,
            allowed: Arc::from(allowed),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Decide whether the request carrying `headers` is admitted.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Caller, AuthError> {
        let token = extract_bearer_token(headers)?;
        let identity = self.jwt_manager.verify(token)?;

        let role = identity
            .role
            .parse::<Role>()
            .map_err(|_| AuthError::RoleNotAllowed(identity.role.clone()))?;
        if !self.allows(role) {
            return Err(AuthError::RoleNotAllowed(role.to_string()));
        }

        Ok(Caller {
            subject: identity.subject,
            role,
            token: token.to_string(),
        })
    }

    /// Put every route of `router` behind this gate.
    pub fn protect<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(from_fn_with_state(self, role_gate_middleware))
    }

    /// Put the methods of one path behind this gate, for paths whose
    /// methods admit different roles.
    pub fn protect_method<S>(self, method_router: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        method_router.route_layer(from_fn_with_state(self, role_gate_middleware))
    }
}

/// Middleware admitting only callers whose role is in the gate's allow-list
pub async fn role_gate_middleware(
    State(gate): State<RoleGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match gate.authorize(request.headers()) {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => {
            counter!("uprava_role_gate_rejections_total", "reason" => e.reason()).increment(1);
            tracing::debug!(
                reason = e.reason(),
                path = %request.uri().path(),
                "Request rejected by role gate"
            );
            e.into_response()
        }
    }
}
