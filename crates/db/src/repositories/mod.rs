//! Store capabilities and their PostgreSQL implementations.
//!
//! Each store is a small `async_trait` interface so services hold
//! `Arc<dyn …>` handles rather than a concrete pool. [`Repositories`] bundles
//! the three PostgreSQL-backed stores for injection.

use std::sync::Arc;

use async_trait::async_trait;
use timeslot_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::item::{
    CreateTimeslotItem, TimeslotItem, TimeslotItemWithUsername, UpdateTimeslotItem,
};
use crate::models::list::{CreateTimeslotList, TimeslotList, UpdateTimeslotList};
use crate::models::user::{CreateUser, User};
use crate::DbPool;

pub mod item_repo;
pub mod list_repo;
pub mod user_repo;

pub use item_repo::ItemRepo;
pub use list_repo::ListRepo;
pub use user_repo::UserRepo;

/// Persistence of user records and credential lookup.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user whose password is already hashed. Returns the new id.
    async fn create_user(&self, input: &CreateUser) -> Result<DbId, DbError>;

    /// Find the user matching both `username` and `password_hash` exactly.
    ///
    /// A wrong username and a wrong password both yield `NotFound`.
    async fn find_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, DbError>;
}

/// Lists, scoped through the `users_lists` ownership link.
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn create(&self, user_id: DbId, input: &CreateTimeslotList) -> Result<DbId, DbError>;

    async fn get_all(&self, user_id: DbId) -> Result<Vec<TimeslotList>, DbError>;

    async fn get_by_id(&self, user_id: DbId, list_id: DbId) -> Result<TimeslotList, DbError>;

    /// Returns `false` when no owned row matched.
    async fn update(
        &self,
        user_id: DbId,
        list_id: DbId,
        input: &UpdateTimeslotList,
    ) -> Result<bool, DbError>;

    /// Returns `false` when no owned row matched.
    async fn delete(&self, user_id: DbId, list_id: DbId) -> Result<bool, DbError>;
}

/// Items, scoped through `lists_items` and then `users_lists`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert an item into `list_id`.
    ///
    /// Does not check who owns `list_id`; callers must have authorized the
    /// list before calling.
    async fn create(&self, list_id: DbId, input: &CreateTimeslotItem) -> Result<DbId, DbError>;

    async fn get_all(&self, user_id: DbId, list_id: DbId) -> Result<Vec<TimeslotItem>, DbError>;

    async fn get_by_id(&self, user_id: DbId, item_id: DbId) -> Result<TimeslotItem, DbError>;

    /// Returns `false` when no owned row matched.
    async fn update(
        &self,
        user_id: DbId,
        item_id: DbId,
        input: &UpdateTimeslotItem,
    ) -> Result<bool, DbError>;

    /// Returns `false` when no owned row matched.
    async fn delete(&self, user_id: DbId, item_id: DbId) -> Result<bool, DbError>;

    /// Items of every user whose interval intersects `[start, end]`.
    ///
    /// Not tenant scoped. The result is privileged reporting data.
    async fn get_by_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<TimeslotItemWithUsername>, DbError>;
}

/// The three stores, constructed over one shared pool.
#[derive(Clone)]
pub struct Repositories {
    pub credentials: Arc<dyn CredentialStore>,
    pub lists: Arc<dyn ListStore>,
    pub items: Arc<dyn ItemStore>,
}

impl Repositories {
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            credentials: Arc::new(UserRepo::new(pool.clone())),
            lists: Arc::new(ListRepo::new(pool.clone())),
            items: Arc::new(ItemRepo::new(pool)),
        }
    }
}
