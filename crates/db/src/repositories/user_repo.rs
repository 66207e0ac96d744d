//! Repository for the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;
use timeslot_core::types::DbId;

use super::CredentialStore;
use crate::error::DbError;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, username, password_hash";

/// PostgreSQL-backed [`CredentialStore`].
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepo {
    async fn create_user(&self, input: &CreateUser) -> Result<DbId, DbError> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO users (name, color, username, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.color)
        .bind(&input.username)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = id, "User created");
        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND password_hash = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound {
                entity: "User",
                id: None,
            })
    }
}
