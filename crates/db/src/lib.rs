//! PostgreSQL data-access layer.
//!
//! Every read, update and delete of a list or item joins back to the
//! requesting user through the link tables (`users_lists`, `lists_items`).
//! Creates insert the resource row and its link row in one transaction.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod patch;
pub mod repositories;
mod tx;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial statement to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
