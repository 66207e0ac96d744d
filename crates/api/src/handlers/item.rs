//! Handlers for timeslot items, nested under lists for create and list-all.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use timeslot_core::types::DbId;
use timeslot_db::models::item::{CreateTimeslotItem, TimeslotItem, UpdateTimeslotItem};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, IdResponse, StatusResponse};
use crate::state::AppState;

/// POST /api/lists/{id}/items
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<CreateTimeslotItem>,
) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let id = state
        .services
        .items
        .create(user.user_id, list_id, &input)
        .await?;
    tracing::info!(user_id = user.user_id, list_id, item_id = id, "Item created");
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /api/lists/{id}/items
pub async fn list_by_list(
    user: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimeslotItem>>>> {
    let data = state.services.items.get_all(user.user_id, list_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeslotItem>> {
    let item = state.services.items.get_by_id(user.user_id, id).await?;
    Ok(Json(item))
}

/// PUT /api/items/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimeslotItem>,
) -> AppResult<Json<StatusResponse>> {
    state.services.items.update(user.user_id, id, &input).await?;
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /api/items/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    state.services.items.delete(user.user_id, id).await?;
    Ok(Json(StatusResponse::ok()))
}
