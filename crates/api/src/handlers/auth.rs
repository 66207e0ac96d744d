//! Handlers for the `/auth` resource (sign-up, sign-in).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::IdResponse;
use crate::services::auth::{SignInRequest, SignUpRequest};
use crate::state::AppState;

/// Response body for `POST /auth/sign-in`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /auth/sign-up
///
/// Register a user. Returns 201 with the new user id.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let id = state.services.auth.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// POST /auth/sign-in
///
/// Exchange username and password for a session token.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.auth.generate_token(&input).await?;
    Ok(Json(TokenResponse { token }))
}
