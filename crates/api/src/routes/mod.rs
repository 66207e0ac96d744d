pub mod auth;
pub mod health;
pub mod items;
pub mod lists;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree. Every route requires a Bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /lists                    list, create
/// /lists/{id}               get, update, delete
/// /lists/{id}/items         list, create
///
/// /items/{id}               get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/lists", lists::router())
        .nest("/items", items::router())
}
