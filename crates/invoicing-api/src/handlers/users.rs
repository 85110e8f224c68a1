// ============================================================================
// Invoicing API - User Handlers
// File: crates/invoicing-api/src/handlers/users.rs
// ============================================================================

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use invoicing_core::domain::{NewUser, UserPatch};
use invoicing_shared::Pagination;

use crate::dto::UserRead;
use crate::error::ApiError;
use crate::middleware::{CurrentUser, MaybeUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Register handler - POST /api/users
pub async fn register(
    State(state): State<AppState>,
    MaybeUser(ctx): MaybeUser,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<ApiResponse<UserRead>>), ApiError> {
    let user = state.users.register(payload, &ctx).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(UserRead::from(&user)))))
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(_ctx): CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Vec<UserRead>>>, ApiError> {
    let users = state.users.list(pagination).await?;
    Ok(Json(ApiResponse::success(users.iter().map(UserRead::from).collect())))
}

/// GET /api/users/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(_ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserRead>>, ApiError> {
    let user = state.users.get(&id).await?;
    Ok(Json(ApiResponse::success(UserRead::from(&user))))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<ApiResponse<UserRead>>, ApiError> {
    let user = state.users.update(&id, patch, &ctx).await?;
    Ok(Json(ApiResponse::success(UserRead::from(&user))))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.users.delete(&id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
