//! Repository for the `timeslots_lists` table and its `users_lists` link.

use async_trait::async_trait;
use sqlx::PgPool;
use timeslot_core::types::DbId;

use super::ListStore;
use crate::error::DbError;
use crate::models::list::{CreateTimeslotList, TimeslotList, UpdateTimeslotList};
use crate::patch::{build_update, UpdateScope};
use crate::tx;

/// Column list for list queries, qualified with the `tl` alias.
const COLUMNS: &str = "tl.id, tl.title, tl.description";

/// PostgreSQL-backed [`ListStore`].
pub struct ListRepo {
    pool: PgPool,
}

impl ListRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListStore for ListRepo {
    /// Insert the list and its ownership link in one transaction.
    async fn create(&self, user_id: DbId, input: &CreateTimeslotList) -> Result<DbId, DbError> {
        let mut tx = tx::begin(&self.pool).await?;

        let inserted = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO timeslots_lists (title, description)
             VALUES ($1, $2)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await;

        let list_id = match inserted {
            Ok(id) => id,
            Err(err) => return Err(tx::abort(tx, err).await),
        };

        let linked = sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(list_id)
            .execute(&mut *tx)
            .await;

        if let Err(err) = linked {
            return Err(tx::abort(tx, err).await);
        }

        tx::commit(tx).await?;
        tracing::debug!(user_id, list_id, "List created");
        Ok(list_id)
    }

    async fn get_all(&self, user_id: DbId) -> Result<Vec<TimeslotList>, DbError> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM timeslots_lists tl
             INNER JOIN users_lists ul ON tl.id = ul.list_id
             WHERE ul.user_id = $1
             ORDER BY tl.id"
        );
        let lists = sqlx::query_as::<_, TimeslotList>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(lists)
    }

    async fn get_by_id(&self, user_id: DbId, list_id: DbId) -> Result<TimeslotList, DbError> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM timeslots_lists tl
             INNER JOIN users_lists ul ON tl.id = ul.list_id
             WHERE ul.user_id = $1 AND ul.list_id = $2"
        );
        sqlx::query_as::<_, TimeslotList>(&query)
            .bind(user_id)
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::not_found("TimeslotList", list_id))
    }

    async fn update(
        &self,
        user_id: DbId,
        list_id: DbId,
        input: &UpdateTimeslotList,
    ) -> Result<bool, DbError> {
        let stmt = build_update(
            input,
            &UpdateScope {
                target: "timeslots_lists tl",
                from: "users_lists ul",
                join: "tl.id = ul.list_id",
                keys: &[("ul.list_id", list_id), ("ul.user_id", user_id)],
            },
        )?;
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "Updating list");

        let result = stmt.query().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the list together with the items it contains.
    ///
    /// Link rows go with their parents through `ON DELETE CASCADE`; the items
    /// themselves are removed explicitly first, in the same transaction.
    async fn delete(&self, user_id: DbId, list_id: DbId) -> Result<bool, DbError> {
        let mut tx = tx::begin(&self.pool).await?;

        let items = sqlx::query(
            "DELETE FROM timeslots_items ti
             USING lists_items li, users_lists ul
             WHERE ti.id = li.item_id
               AND li.list_id = ul.list_id
               AND ul.user_id = $1
               AND ul.list_id = $2",
        )
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await;

        if let Err(err) = items {
            return Err(tx::abort(tx, err).await);
        }

        let deleted = sqlx::query(
            "DELETE FROM timeslots_lists tl
             USING users_lists ul
             WHERE tl.id = ul.list_id
               AND ul.user_id = $1
               AND ul.list_id = $2",
        )
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await;

        let rows = match deleted {
            Ok(result) => result.rows_affected(),
            Err(err) => return Err(tx::abort(tx, err).await),
        };

        tx::commit(tx).await?;
        Ok(rows > 0)
    }
}
