//! Password digests keyed by a fixed application-wide salt.
//!
//! Sign-in looks a user up by `(username, password_hash)` with an exact match,
//! so the digest must be deterministic: the same password always produces the
//! same PHC string. Argon2id is used as the digest, with the configured salt
//! in place of a per-user random one.

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

/// Argon2 rejects salts shorter than this many bytes.
const MIN_SALT_BYTES: usize = 8;

/// PHC salts are limited to 64 base64 characters, i.e. 48 raw bytes.
const MAX_SALT_BYTES: usize = 48;

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Salt configuration for password digests.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Application-wide salt. Changing it invalidates every stored hash.
    pub salt: String,
}

impl PasswordConfig {
    /// Load the salt from `PASSWORD_SALT`.
    ///
    /// # Panics
    ///
    /// Panics if `PASSWORD_SALT` is unset or outside 8..=48 bytes.
    pub fn from_env() -> Self {
        let salt =
            std::env::var("PASSWORD_SALT").expect("PASSWORD_SALT must be set in the environment");
        assert!(
            (MIN_SALT_BYTES..=MAX_SALT_BYTES).contains(&salt.len()),
            "PASSWORD_SALT must be between {MIN_SALT_BYTES} and {MAX_SALT_BYTES} bytes"
        );
        Self { salt }
    }
}

/// Hash `password` with the application salt.
///
/// Returns the PHC-formatted hash string. Deterministic for a given salt.
pub fn hash_password(password: &str, config: &PasswordConfig) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::encode_b64(config.salt.as_bytes())?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Validate that a password meets minimum strength requirements.
///
/// Returns `Ok(())` when the password is acceptable, or `Err` with a
/// human-readable explanation.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}
