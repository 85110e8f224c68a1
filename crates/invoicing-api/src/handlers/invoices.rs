// ============================================================================
// Invoicing API - Invoice Handlers
// File: crates/invoicing-api/src/handlers/invoices.rs
// ============================================================================

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use invoicing_core::domain::{InvoicePatch, NewInvoice};
use invoicing_shared::Pagination;

use crate::dto::InvoiceRead;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/invoices
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<NewInvoice>,
) -> Result<(StatusCode, Json<ApiResponse<InvoiceRead>>), ApiError> {
    let invoice = state.invoices.create(payload, &ctx).await?;
    let details = state.invoices.get(&invoice.id, &ctx).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(InvoiceRead::from(&details)))))
}

/// GET /api/invoices
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Vec<InvoiceRead>>>, ApiError> {
    let invoices = state.invoices.list(&ctx, pagination).await?;
    Ok(Json(ApiResponse::success(invoices.iter().map(InvoiceRead::from).collect())))
}

/// GET /api/invoices/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceRead>>, ApiError> {
    let details = state.invoices.get(&id, &ctx).await?;
    Ok(Json(ApiResponse::success(InvoiceRead::from(&details))))
}

/// PUT /api/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<InvoicePatch>,
) -> Result<Json<ApiResponse<InvoiceRead>>, ApiError> {
    state.invoices.update(&id, patch, &ctx).await?;
    let details = state.invoices.get(&id, &ctx).await?;
    Ok(Json(ApiResponse::success(InvoiceRead::from(&details))))
}

/// DELETE /api/invoices/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.invoices.delete(&id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
