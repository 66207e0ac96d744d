//! Sign-up, sign-in and token resolution.

use std::sync::Arc;

use serde::Deserialize;
use timeslot_core::error::CoreError;
use timeslot_core::types::DbId;
use timeslot_db::models::user::CreateUser;
use timeslot_db::repositories::CredentialStore;
use timeslot_db::DbError;
use validator::Validate;

use crate::auth::jwt::{issue_token, parse_token, JwtConfig, TokenError};
use crate::auth::password::{
    hash_password, validate_password_strength, PasswordConfig, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};

/// Candidate user submitted at sign-up. The password is plaintext here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "color is required"))]
    pub color: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    pub password: String,
}

/// Credentials submitted at sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    jwt: JwtConfig,
    password: PasswordConfig,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        jwt: JwtConfig,
        password: PasswordConfig,
    ) -> Self {
        Self {
            credentials,
            jwt,
            password,
        }
    }

    /// Hash the candidate's password and persist the user. Returns the new id.
    pub async fn create_user(&self, input: SignUpRequest) -> AppResult<DbId> {
        input.validate()?;
        validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

        let password_hash = self.hash(input.password).await?;
        let id = self
            .credentials
            .create_user(&CreateUser {
                name: input.name,
                color: input.color,
                username: input.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = id, "User signed up");
        Ok(id)
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn generate_token(&self, input: &SignInRequest) -> AppResult<String> {
        let password_hash = self.hash(input.password.clone()).await?;

        let user = match self
            .credentials
            .find_by_credentials(&input.username, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(DbError::NotFound { .. }) => {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Invalid username or password".into(),
                )))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(issue_token(user.id, &self.jwt)?)
    }

    /// Resolve the user id a bearer token was issued for.
    pub fn parse_token(&self, token: &str) -> Result<DbId, TokenError> {
        parse_token(token, &self.jwt)
    }

    /// Argon2 is CPU- and memory-bound, so it runs on the blocking pool.
    async fn hash(&self, password: String) -> AppResult<String> {
        let config = self.password.clone();
        tokio::task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
    }
}
