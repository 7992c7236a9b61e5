use crate::models::Session;
use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while verifying a session token
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Claims minted by the backend's token endpoint (SimpleJWT access tokens).
/// `token_type` and `jti` exist on the wire but carry nothing we need.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    user_id: i64,
    exp: i64,
}

/// Verifies backend-issued JWT access tokens into explicit [`Session`]
/// values.
///
/// Holds the backend's HS256 signing secret; a token that does not verify
/// against it is rejected outright. Handlers pass the resulting session to
/// whatever needs the caller's identity.
#[derive(Clone)]
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a raw token string
    pub fn verify(&self, token: &str) -> Result<Session, SessionError> {
        let data = decode::<AccessClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::InvalidToken(e.to_string()),
            }
        })?;

        let expires_at = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or_else(|| SessionError::InvalidToken("unrepresentable expiry".to_string()))?;

        Ok(Session {
            user_id: data.claims.user_id,
            expires_at,
        })
    }

    /// Verify the token carried in an `Authorization: Bearer ...` header
    pub fn verify_header(&self, header: Option<&str>) -> Result<Session, SessionError> {
        let header = header.ok_or(SessionError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(SessionError::MissingToken)?;
        self.verify(token.trim())
    }
}
