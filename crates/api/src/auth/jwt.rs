//! Session token issuance and validation.
//!
//! Tokens are stateless HS256-signed JWTs with header `{typ, alg}` and a
//! [`Claims`] payload `{user_id, iat, exp}`. There is no server-side
//! revocation; expiry is the only bound on a token's lifetime.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use timeslot_core::types::DbId;

/// The only accepted signing algorithm.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime in hours.
const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub user_id: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 12).
    pub token_ttl_hours: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `JWT_SECRET`          | **yes**  | --      |
    /// | `JWT_TOKEN_TTL_HOURS` | no       | `12`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_ttl_hours = crate::config::env_or("JWT_TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS);

        Self {
            secret,
            token_ttl_hours,
        }
    }
}

/// Why a token was rejected.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not verify, or the header names another algorithm.
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

/// Issue a token for `user_id`, valid from now for the configured TTL.
pub fn issue_token(user_id: DbId, config: &JwtConfig) -> Result<String, TokenError> {
    issue_token_at(user_id, chrono::Utc::now().timestamp(), config)
}

/// Issue a token as if the current time were `now` (UTC Unix timestamp).
fn issue_token_at(user_id: DbId, now: i64, config: &JwtConfig) -> Result<String, TokenError> {
    let claims = Claims {
        user_id,
        iat: now,
        exp: now + config.token_ttl_hours * 3600,
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify `token` and return the user id it was issued for.
///
/// The algorithm must be HS256 and the signature must match the configured
/// secret. Expiry is checked without leeway.
pub fn parse_token(token: &str, config: &JwtConfig) -> Result<DbId, TokenError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims.user_id)
}
