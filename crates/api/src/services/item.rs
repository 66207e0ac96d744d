use std::sync::Arc;

use timeslot_core::error::CoreError;
use timeslot_core::types::DbId;
use timeslot_db::models::item::{
    CreateTimeslotItem, ItemsByRange, TimeslotItem, TimeslotItemWithUsername, UpdateTimeslotItem,
};
use timeslot_db::patch::Patch;
use timeslot_db::repositories::{ItemStore, ListStore};
use timeslot_db::DbError;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub struct ItemService {
    items: Arc<dyn ItemStore>,
    lists: Arc<dyn ListStore>,
}

impl ItemService {
    pub fn new(items: Arc<dyn ItemStore>, lists: Arc<dyn ListStore>) -> Self {
        Self { items, lists }
    }

    /// Create an item in `list_id` after proving `user_id` owns the list.
    ///
    /// The item store does not re-check ownership; this lookup is the
    /// authorization it relies on.
    pub async fn create(
        &self,
        user_id: DbId,
        list_id: DbId,
        input: &CreateTimeslotItem,
    ) -> AppResult<DbId> {
        input.validate()?;
        self.lists.get_by_id(user_id, list_id).await?;
        Ok(self.items.create(list_id, input).await?)
    }

    pub async fn get_all(&self, user_id: DbId, list_id: DbId) -> AppResult<Vec<TimeslotItem>> {
        Ok(self.items.get_all(user_id, list_id).await?)
    }

    pub async fn get_by_id(&self, user_id: DbId, item_id: DbId) -> AppResult<TimeslotItem> {
        Ok(self.items.get_by_id(user_id, item_id).await?)
    }

    /// Apply a partial update. An item the user does not own is `NotFound`.
    pub async fn update(
        &self,
        user_id: DbId,
        item_id: DbId,
        input: &UpdateTimeslotItem,
    ) -> AppResult<()> {
        if input.is_empty() {
            return Err(DbError::EmptyUpdate.into());
        }
        input.validate()?;
        if !self.items.update(user_id, item_id, input).await? {
            return Err(not_found(item_id));
        }
        Ok(())
    }

    pub async fn delete(&self, user_id: DbId, item_id: DbId) -> AppResult<()> {
        if !self.items.delete(user_id, item_id).await? {
            return Err(not_found(item_id));
        }
        Ok(())
    }

    /// Items of every user intersecting `[range.start, range.end]`.
    ///
    /// Admin-only reporting data; it is not mounted on the HTTP surface.
    pub async fn get_by_range(
        &self,
        range: ItemsByRange,
    ) -> AppResult<Vec<TimeslotItemWithUsername>> {
        if range.start > range.end {
            return Err(CoreError::Validation("range start must not follow its end".into()).into());
        }
        Ok(self.items.get_by_range(range.start, range.end).await?)
    }
}

fn not_found(id: DbId) -> AppError {
    CoreError::NotFound {
        entity: "TimeslotItem",
        id,
    }
    .into()
}
