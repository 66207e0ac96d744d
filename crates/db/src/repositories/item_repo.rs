//! Repository for the `timeslots_items` table and its `lists_items` link.
//!
//! Scoped reads and writes join two hops: item -> `lists_items` ->
//! `users_lists` -> user.

use async_trait::async_trait;
use sqlx::PgPool;
use timeslot_core::types::{DbId, Timestamp};

use super::ItemStore;
use crate::error::DbError;
use crate::models::item::{
    CreateTimeslotItem, TimeslotItem, TimeslotItemWithUsername, UpdateTimeslotItem,
};
use crate::patch::{build_update, UpdateScope};
use crate::tx;

/// Column list for item queries, qualified with the `ti` alias.
const COLUMNS: &str = "ti.id, ti.title, ti.description, ti.beginning, ti.finish, ti.done";

/// PostgreSQL-backed [`ItemStore`].
pub struct ItemRepo {
    pool: PgPool,
}

impl ItemRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepo {
    async fn create(&self, list_id: DbId, input: &CreateTimeslotItem) -> Result<DbId, DbError> {
        let mut tx = tx::begin(&self.pool).await?;

        let inserted = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO timeslots_items (title, description, beginning, finish)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.start)
        .bind(input.end)
        .fetch_one(&mut *tx)
        .await;

        let item_id = match inserted {
            Ok(id) => id,
            Err(err) => return Err(tx::abort(tx, err).await),
        };

        let linked = sqlx::query("INSERT INTO lists_items (list_id, item_id) VALUES ($1, $2)")
            .bind(list_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await;

        if let Err(err) = linked {
            return Err(tx::abort(tx, err).await);
        }

        tx::commit(tx).await?;
        tracing::debug!(list_id, item_id, "Item created");
        Ok(item_id)
    }

    async fn get_all(&self, user_id: DbId, list_id: DbId) -> Result<Vec<TimeslotItem>, DbError> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM timeslots_items ti
             INNER JOIN lists_items li ON li.item_id = ti.id
             INNER JOIN users_lists ul ON ul.list_id = li.list_id
             WHERE li.list_id = $1 AND ul.user_id = $2
             ORDER BY ti.beginning, ti.id"
        );
        let items = sqlx::query_as::<_, TimeslotItem>(&query)
            .bind(list_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn get_by_id(&self, user_id: DbId, item_id: DbId) -> Result<TimeslotItem, DbError> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM timeslots_items ti
             INNER JOIN lists_items li ON li.item_id = ti.id
             INNER JOIN users_lists ul ON ul.list_id = li.list_id
             WHERE ti.id = $1 AND ul.user_id = $2"
        );
        sqlx::query_as::<_, TimeslotItem>(&query)
            .bind(item_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::not_found("TimeslotItem", item_id))
    }

    async fn update(
        &self,
        user_id: DbId,
        item_id: DbId,
        input: &UpdateTimeslotItem,
    ) -> Result<bool, DbError> {
        let stmt = build_update(
            input,
            &UpdateScope {
                target: "timeslots_items ti",
                from: "lists_items li, users_lists ul",
                join: "ti.id = li.item_id AND li.list_id = ul.list_id",
                keys: &[("ul.user_id", user_id), ("ti.id", item_id)],
            },
        )?;
        tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "Updating item");

        let result = stmt.query().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: DbId, item_id: DbId) -> Result<bool, DbError> {
        let result = sqlx::query(
            "DELETE FROM timeslots_items ti
             USING lists_items li, users_lists ul
             WHERE ti.id = li.item_id
               AND li.list_id = ul.list_id
               AND ul.user_id = $1
               AND ti.id = $2",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<TimeslotItemWithUsername>, DbError> {
        let query = format!(
            "SELECT {COLUMNS}, u.username
             FROM timeslots_items ti
             INNER JOIN lists_items li ON li.item_id = ti.id
             INNER JOIN users_lists ul ON ul.list_id = li.list_id
             INNER JOIN users u ON u.id = ul.user_id
             WHERE ti.beginning <= $2 AND ti.finish >= $1
             ORDER BY ti.beginning, ti.id"
        );
        let items = sqlx::query_as::<_, TimeslotItemWithUsername>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }
}
