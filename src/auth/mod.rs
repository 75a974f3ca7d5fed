//! Identity tokens and password hashing.

pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub use password::{hash_password, verify_password, PasswordError};

/// Claims carried by an issued token. `exp` is only present when expiry is
/// configured.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Claims as read back from an untrusted token; `id` may be anything.
#[derive(Debug, Deserialize)]
struct UntrustedClaims {
    #[serde(default)]
    id: Option<Value>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(String),

    /// Bad signature, malformed token, wrong secret or expired.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The token verified but carries no usable subject id.
    #[error("token carries no subject")]
    MissingSubject,
}

/// Sign a token for `subject`. With `ttl` unset the payload holds only the
/// subject, so the same subject and secret always produce the same token.
pub fn issue(subject: Uuid, secret: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let exp = match ttl {
        Some(ttl) => Some(
            Utc::now()
                .checked_add_signed(ttl)
                .ok_or_else(|| TokenError::Generation("token lifetime out of range".to_string()))?
                .timestamp(),
        ),
        None => None,
    };

    let claims = Claims { id: subject, exp };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify `token` and return its subject.
pub fn verify(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens without `exp` never expire; `exp` is still enforced when present.
    validation.required_spec_claims.clear();

    let token_data = decode::<UntrustedClaims>(token, &decoding_key, &validation)?;

    match token_data.claims.id {
        Some(Value::String(id)) => Uuid::parse_str(&id).map_err(|_| TokenError::MissingSubject),
        _ => Err(TokenError::MissingSubject),
    }
}
