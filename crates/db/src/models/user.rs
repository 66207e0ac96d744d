//! User entity model and DTOs.

use sqlx::FromRow;
use timeslot_core::types::DbId;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub username: String,
    pub password_hash: String,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub color: String,
    pub username: String,
    pub password_hash: String,
}
