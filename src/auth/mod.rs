use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

/// Claims embedded in every issued bearer token. `/api/me` returns these
/// verbatim, so the shape is part of the API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: i64, email: String, role: String, name: String, expiry_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            role,
            name,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token generation failed: {0}")]
    TokenGeneration(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("signing secret is empty")]
    EmptySecret,
}

/// Sign claims into an HS256 bearer token.
pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::EmptySecret);
    }

    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(AuthError::TokenGeneration)
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::EmptySecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(expiry_hours: i64) -> Claims {
        Claims::new(
            1,
            "admin@samaced.test".to_string(),
            "admin".to_string(),
            "Admin".to_string(),
            expiry_hours,
        )
    }

    #[test]
    fn round_trip_preserves_claims() {
        let token = generate_token(&claims(8), "secret").unwrap();
        let decoded = verify_token(&token, "secret").unwrap();
        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.email, "admin@samaced.test");
        assert_eq!(decoded.role, "admin");
        assert_eq!(decoded.name, "Admin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(&claims(8), "secret").unwrap();
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = generate_token(&claims(-1), "secret").unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(generate_token(&claims(8), "").is_err());
        assert!(verify_token("whatever", "").is_err());
    }
}
