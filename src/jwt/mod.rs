//! Bearer token verification
//!
//! Tokens are issued by the identity service and signed with a shared HS256
//! secret. This module only verifies them.

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;

/// Claims read from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subject (person or legal entity id)
    pub subject: String,
    /// Raw role claim; unknown roles are rejected by the role gate
    pub role: String,
}

/// Claims as they appear on the wire. Kept loose so that a missing or
/// non-string claim is reported precisely instead of as a decode error.
#[derive(Debug, Deserialize)]
struct WireClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    role: Option<Value>,
}

/// Verifies bearer tokens against the process-wide secret
#[derive(Clone)]
pub struct JwtManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry, then extract subject and role.
    pub fn verify(&self, token: &str) -> Result<Identity> {
        let data = decode::<WireClaims>(token, &self.decoding_key, &self.validation)?;
        let subject = string_claim(data.claims.sub, "sub")?;
        let role = string_claim(data.claims.role, "role")?;
        Ok(Identity { subject, role })
    }
}

fn string_claim(value: Option<Value>, name: &str) -> Result<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) | None => Err(AppError::Unauthorized(format!(
            "Token is missing the '{}' claim",
            name
        ))),
        Some(_) => Err(AppError::Unauthorized(format!(
            "Token claim '{}' must be a string",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-secret-key";

    fn manager() -> JwtManager {
        JwtManager::new(&JwtConfig {
            secret: SECRET.to_string(),
            leeway_secs: 5,
        })
    }

    fn sign(claims: Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_verify_valid_token() {
        let token = sign(
            json!({"sub": "p-1", "role": "ADMIN", "exp": in_one_hour()}),
            SECRET,
        );
        let identity = manager().verify(&token).unwrap();
        assert_eq!(
            identity,
            Identity {
                subject: "p-1".to_string(),
                role: "ADMIN".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = sign(
            json!({"sub": "p-1", "role": "ADMIN", "exp": in_one_hour()}),
            "other-secret",
        );
        assert!(matches!(manager().verify(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = sign(
            json!({"sub": "p-1", "role": "USER", "exp": Utc::now().timestamp() - 120}),
            SECRET,
        );
        match manager().verify(&token) {
            Err(AppError::Jwt(e)) => assert!(matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            )),
            other => panic!("expected expired signature, got {:?}", other),
        }
    }

    #[test]
    fn test_token_without_exp_is_rejected() {
        let token = sign(json!({"sub": "p-1", "role": "USER"}), SECRET);
        assert!(manager().verify(&token).is_err());
    }

    #[test]
    fn test_missing_role_claim() {
        let token = sign(json!({"sub": "p-1", "exp": in_one_hour()}), SECRET);
        assert!(matches!(
            manager().verify(&token),
            Err(AppError::Unauthorized(msg)) if msg.contains("role")
        ));
    }

    #[test]
    fn test_non_string_subject_claim() {
        let token = sign(
            json!({"sub": 42, "role": "USER", "exp": in_one_hour()}),
            SECRET,
        );
        assert!(matches!(
            manager().verify(&token),
            Err(AppError::Unauthorized(msg)) if msg.contains("sub")
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(manager().verify("not.a.jwt").is_err());
    }
}
