//! Authenticated caller extractor and authentication errors
//!
//! The role gate admits a request and stores a [`Caller`] in its extensions;
//! handlers take the caller as an extractor argument.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::Role;
use crate::error::AppError;

/// Caller admitted by the role gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Subject from the token's `sub` claim
    pub subject: String,
    pub role: Role,
    /// Bearer token as received, forwarded unchanged to peer services
    pub token: String,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Resolve the subject a request acts on. Users may only act on
    /// themselves; admins may name anyone.
    pub fn acting_for(&self, requested: Option<&str>) -> Result<String, AppError> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(self.subject.clone()),
            Some(subject) if subject == self.subject || self.is_admin() => {
                Ok(subject.to_string())
            }
            Some(_) => Err(AppError::Forbidden(
                "Users may only act on their own records".to_string(),
            )),
        }
    }
}

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken(String),
    /// Token has expired
    TokenExpired,
    /// Subject or role claim absent or not a string
    MissingClaim(String),
    /// Role is not in the route's allow-list
    RoleNotAllowed(String),
}

impl AuthError {
    /// Label used for rejection metrics
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidHeader(_) => "invalid_header",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::MissingClaim(_) => "missing_claim",
            AuthError::RoleNotAllowed(_) => "role_not_allowed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::RoleNotAllowed(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Jwt(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            },
            AppError::Unauthorized(msg) => AuthError::MissingClaim(msg),
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (message, code) = match &self {
            AuthError::MissingToken => ("Missing authorization token", "UNAUTHORIZED"),
            AuthError::InvalidHeader(_) => ("Invalid authorization header", "UNAUTHORIZED"),
            AuthError::InvalidToken(_) => ("Invalid token", "UNAUTHORIZED"),
            AuthError::TokenExpired => ("Token has expired", "UNAUTHORIZED"),
            AuthError::MissingClaim(_) => ("Token is missing required claims", "UNAUTHORIZED"),
            AuthError::RoleNotAllowed(_) => ("Role is not allowed for this route", "FORBIDDEN"),
        };

        let body = serde_json::json!({
            "error": message,
            "code": code
        });

        (self.status(), axum::Json(body)).into_response()
    }
}

/// Extract and validate Bearer token from Authorization header
pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::InvalidHeader("Authorization header must use Bearer scheme".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidHeader("Empty bearer token".to_string()));
    }

    Ok(token)
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the role gate admitted the request.
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn caller(role: Role) -> Caller {
        Caller {
            subject: "p-1".to_string(),
            role,
            token: "t".to_string(),
        }
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token_empty() {
        let headers = headers_with("Bearer   ");
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token_valid() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_statuses() {
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::MissingClaim("role".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RoleNotAllowed("USER".to_string()).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_user_acts_only_for_self() {
        let user = caller(Role::User);
        assert_eq!(user.acting_for(None).unwrap(), "p-1");
        assert_eq!(user.acting_for(Some("p-1")).unwrap(), "p-1");
        assert!(matches!(
            user.acting_for(Some("p-2")),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_acts_for_anyone() {
        let admin = caller(Role::Admin);
        assert_eq!(admin.acting_for(Some("p-2")).unwrap(), "p-2");
        assert_eq!(admin.acting_for(Some("  ")).unwrap(), "p-1");
    }
}
