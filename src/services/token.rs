//! Session token issuance and verification

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{SessionClaims, User},
};

/// Signs and verifies self-contained session tokens
#[cfg_attr(test, mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    /// Sign `claims` into a token that expires after `lifetime`
    fn new_token(&self, lifetime: Duration, claims: &SessionClaims) -> AppResult<String>;

    /// Verify a token's signature and expiry and return its claims
    fn verify(&self, token: &str) -> AppResult<SessionClaims>;
}

/// JWT payload
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    /// Subject (user ID)
    sub: String,
    user: User,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// HS256 JWT generator keyed by the process-wide secret
pub struct JwtGenerator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtGenerator {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenGenerator for JwtGenerator {
    fn new_token(&self, lifetime: Duration, claims: &SessionClaims) -> AppResult<String> {
        let lifetime = chrono::Duration::from_std(lifetime)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid session length: {}", e)))?;
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Session length overflows the clock")))?;

        let payload = TokenPayload {
            sub: claims.user.id.to_string(),
            user: claims.user.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &payload, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let token_data = decode::<TokenPayload>(token, &self.decoding_key, &Validation::default())?;

        Ok(SessionClaims::new(token_data.claims.user))
    }
}
