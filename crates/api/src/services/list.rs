use std::sync::Arc;

use timeslot_core::error::CoreError;
use timeslot_core::types::DbId;
use timeslot_db::models::list::{CreateTimeslotList, TimeslotList, UpdateTimeslotList};
use timeslot_db::patch::Patch;
use timeslot_db::repositories::ListStore;
use timeslot_db::DbError;
use validator::Validate;

use crate::error::AppResult;

pub struct ListService {
    lists: Arc<dyn ListStore>,
}

impl ListService {
    pub fn new(lists: Arc<dyn ListStore>) -> Self {
        Self { lists }
    }

    pub async fn create(&self, user_id: DbId, input: &CreateTimeslotList) -> AppResult<DbId> {
        input.validate()?;
        Ok(self.lists.create(user_id, input).await?)
    }

    pub async fn get_all(&self, user_id: DbId) -> AppResult<Vec<TimeslotList>> {
        Ok(self.lists.get_all(user_id).await?)
    }

    pub async fn get_by_id(&self, user_id: DbId, list_id: DbId) -> AppResult<TimeslotList> {
        Ok(self.lists.get_by_id(user_id, list_id).await?)
    }

    /// Apply a partial update. A list the user does not own is `NotFound`.
    pub async fn update(
        &self,
        user_id: DbId,
        list_id: DbId,
        input: &UpdateTimeslotList,
    ) -> AppResult<()> {
        if input.is_empty() {
            return Err(DbError::EmptyUpdate.into());
        }
        input.validate()?;
        if !self.lists.update(user_id, list_id, input).await? {
            return Err(not_found(list_id));
        }
        Ok(())
    }

    pub async fn delete(&self, user_id: DbId, list_id: DbId) -> AppResult<()> {
        if !self.lists.delete(user_id, list_id).await? {
            return Err(not_found(list_id));
        }
        Ok(())
    }
}

fn not_found(id: DbId) -> crate::error::AppError {
    CoreError::NotFound {
        entity: "TimeslotList",
        id,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;

    /// Store double that counts every call and owns nothing.
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ListStore for CountingStore {
        async fn create(&self, _: DbId, _: &CreateTimeslotList) -> Result<DbId, DbError> {
            self.hit();
            Ok(1)
        }

        async fn get_all(&self, _: DbId) -> Result<Vec<TimeslotList>, DbError> {
            self.hit();
            Ok(Vec::new())
        }

        async fn get_by_id(&self, _: DbId, list_id: DbId) -> Result<TimeslotList, DbError> {
            self.hit();
            Err(DbError::not_found("TimeslotList", list_id))
        }

        async fn update(&self, _: DbId, _: DbId, _: &UpdateTimeslotList) -> Result<bool, DbError> {
            self.hit();
            Ok(false)
        }

        async fn delete(&self, _: DbId, _: DbId) -> Result<bool, DbError> {
            self.hit();
            Ok(false)
        }
    }

    fn service() -> (ListService, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        (ListService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn empty_update_never_reaches_the_store() {
        let (service, store) = service();

        let result = service
            .update(1, 1, &UpdateTimeslotList::default())
            .await;

        assert_matches!(result, Err(AppError::Db(DbError::EmptyUpdate)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_title_never_reaches_the_store() {
        let (service, store) = service();
        let input = CreateTimeslotList {
            title: String::new(),
            description: String::new(),
        };

        let result = service.create(1, &input).await;

        assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_title_update_never_reaches_the_store() {
        let (service, store) = service();
        let input = UpdateTimeslotList {
            title: Some(String::new()),
            description: None,
        };

        let result = service.update(1, 5, &input).await;

        assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_rows_affected_is_not_found() {
        let (service, _) = service();
        let input = UpdateTimeslotList {
            title: Some("x".into()),
            description: None,
        };

        assert_matches!(
            service.update(1, 5, &input).await,
            Err(AppError::Core(CoreError::NotFound { id: 5, .. }))
        );
        assert_matches!(
            service.delete(1, 5).await,
            Err(AppError::Core(CoreError::NotFound { id: 5, .. }))
        );
    }
}
