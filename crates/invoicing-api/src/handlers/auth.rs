// ============================================================================
// Invoicing API - Auth Handlers
// File: crates/invoicing-api/src/handlers/auth.rs
// ============================================================================

use axum::{extract::State, Json};

use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login handler - POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::Unauthorized("Email and password are required".to_string()));
    }

    let result = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success(LoginResponse::from(result))))
}
