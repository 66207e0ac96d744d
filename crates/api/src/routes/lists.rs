//! Route definitions for the `/lists` resource.
//!
//! Also nests item creation and listing under `/lists/{id}/items`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{item, list};
use crate::state::AppState;

/// Routes mounted at `/lists`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
///
/// GET    /{id}/items          -> list_by_list
/// POST   /{id}/items          -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list).post(list::create))
        .route(
            "/{id}",
            get(list::get_by_id).put(list::update).delete(list::delete),
        )
        .route(
            "/{id}/items",
            get(item::list_by_list).post(item::create),
        )
}
