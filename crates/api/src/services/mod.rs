//! Service layer between the HTTP handlers and the stores.
//!
//! [`Services`] composes the three sub-services explicitly; each one holds
//! only the store capabilities it needs.

use timeslot_db::repositories::Repositories;

use crate::config::ServerConfig;

pub mod auth;
pub mod item;
pub mod list;

pub use auth::AuthService;
pub use item::ItemService;
pub use list::ListService;

pub struct Services {
    pub auth: AuthService,
    pub lists: ListService,
    pub items: ItemService,
}

impl Services {
    pub fn new(repos: Repositories, config: &ServerConfig) -> Self {
        Self {
            auth: AuthService::new(
                repos.credentials,
                config.jwt.clone(),
                config.password.clone(),
            ),
            lists: ListService::new(repos.lists.clone()),
            items: ItemService::new(repos.items, repos.lists),
        }
    }
}
