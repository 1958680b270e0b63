//! Session Token Service
//! Mission: Issue and verify signed session tokens

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::auth::models::Claims;

/// Capability interface over session tokens so the HS256 implementation and
/// test doubles are interchangeable by construction.
pub trait TokenService: Send + Sync {
    fn issue(&self, username: &str) -> Result<String>;
    fn verify(&self, token: &str) -> Result<Claims>;
}

/// HS256 token service. The signing secret is injected at construction, not
/// read from a global.
pub struct JwtTokenService {
    secret: String,
    expiry_hours: i64,
}

impl JwtTokenService {
    /// Create a token service with the default 24-hour session lifetime.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiry_hours: 24,
        }
    }
}

impl TokenService for JwtTokenService {
    /// Sign a token carrying `{username, exp = now + 24h}`.
    fn issue(&self, username: &str) -> Result<String> {
        let expires_at = Utc::now()
            .checked_add_signed(chrono::Duration::hours(self.expiry_hours))
            .context("Invalid expiry timestamp")?;

        let claims = Claims {
            username: username.to_string(),
            exp: expires_at.timestamp() as usize,
        };

        debug!(
            "Issuing session token for {}, expires in {}h",
            username, self.expiry_hours
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign session token")
    }

    /// Decode and validate signature and expiry. Signature mismatch,
    /// malformed payload, and passed expiry all collapse into one error.
    fn verify(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        Ok(decoded.claims)
    }
}
