//! Credential and session primitives.
//!
//! - [`password`] -- deterministic Argon2id password digests keyed by the application salt.
//! - [`jwt`] -- signed, time-bounded session tokens.

pub mod jwt;
pub mod password;
