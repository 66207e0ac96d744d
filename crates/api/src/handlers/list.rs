//! Handlers for the `/lists` resource.
//!
//! All handlers are scoped to the authenticated user; lists owned by anyone
//! else behave as if they did not exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use timeslot_core::types::DbId;
use timeslot_db::models::list::{CreateTimeslotList, TimeslotList, UpdateTimeslotList};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, IdResponse, StatusResponse};
use crate::state::AppState;

/// POST /api/lists
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTimeslotList>,
) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let id = state.services.lists.create(user.user_id, &input).await?;
    tracing::info!(user_id = user.user_id, list_id = id, "List created");
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /api/lists
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TimeslotList>>>> {
    let data = state.services.lists.get_all(user.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/lists/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeslotList>> {
    let list = state.services.lists.get_by_id(user.user_id, id).await?;
    Ok(Json(list))
}

/// PUT /api/lists/{id}
///
/// Partial update: only fields present in the body are written.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimeslotList>,
) -> AppResult<Json<StatusResponse>> {
    state.services.lists.update(user.user_id, id, &input).await?;
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /api/lists/{id}
///
/// Removes the list and every item in it.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    state.services.lists.delete(user.user_id, id).await?;
    tracing::info!(user_id = user.user_id, list_id = id, "List deleted");
    Ok(Json(StatusResponse::ok()))
}
