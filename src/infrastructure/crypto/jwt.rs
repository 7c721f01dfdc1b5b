//! JWT access tokens
//!
//! Tokens are stateless: `{sub, iat, exp}` signed with a process-wide
//! HMAC secret. There is no server-side store and no revocation; a token
//! stops being valid the moment `exp` passes.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::Principal;

/// JWT configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Default token lifetime in minutes
    pub expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "super-secret-key-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            expiration_minutes: 30,
        }
    }
}

/// Claims carried by every access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Subject (user email)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenConfigError {
    #[error("JWT secret must not be empty")]
    EmptySecret,
    #[error("unsupported JWT algorithm {0:?}: only HS256, HS384 and HS512 are allowed")]
    UnsupportedAlgorithm(Algorithm),
}

/// Issues and verifies bearer tokens.
///
/// Keys are derived once at construction; the service is read-only
/// afterwards and is shared across requests behind an `Arc`.
pub struct TokenService {
    algorithm: Algorithm,
    expiration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Result<Self, TokenConfigError> {
        if config.secret.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenConfigError::UnsupportedAlgorithm(config.algorithm));
        }

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            algorithm: config.algorithm,
            expiration: Duration::minutes(config.expiration_minutes),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Default lifetime of tokens minted without an explicit expiry.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Sign a token for `subject`, valid for `expires_in` (or the configured default).
    pub fn create_access_token(
        &self,
        subject: &str,
        expires_in: Option<Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + expires_in.unwrap_or(self.expiration);
        let claims = AccessClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
    }

    /// Decode and fully validate a token.
    pub fn decode_claims(&self, token: &str) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Resolve a token to its principal, or return `on_failure()`.
    ///
    /// Bad signature, malformed structure, expiry and a missing or empty
    /// subject all take the same failure path.
    pub fn verify_access_token<E, F>(&self, token: &str, on_failure: F) -> Result<Principal, E>
    where
        F: FnOnce() -> E,
    {
        match self.decode_claims(token) {
            Ok(claims) if !claims.sub.is_empty() => Ok(Principal::new(claims.sub)),
            Ok(_) => {
                debug!("Rejected token with empty subject");
                Err(on_failure())
            }
            Err(e) => {
                debug!(reason = %e, "Rejected access token");
                Err(on_failure())
            }
        }
    }
}
