pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

pub use password::{CredentialHasher, PasswordError};

/// Identity assertions carried inside a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("JWT expiry of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("JWT generation error: {0}")]
    Issue(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Signs claims into HS256 tokens and verifies them with one shared secret.
///
/// No method here decodes a token without checking its signature.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], expiry_hours: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let expiry = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .filter(|expiry| Utc::now().checked_add_signed(*expiry).is_some())
            .ok_or(TokenError::InvalidExpiry(expiry_hours))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiry,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(security.jwt_secret.as_bytes(), security.jwt_expiry_hours)
    }

    /// Issue a token asserting `{username, admin}`.
    pub fn issue(&self, username: &str, is_admin: bool) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| TokenError::Issue("expiry overflows the clock".to_string()))?;
        let claims = Claims {
            username: username.to_string(),
            admin: is_admin,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Check the signature (and expiry) and only then hand back the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::InvalidToken("empty token".to_string()));
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }
}
