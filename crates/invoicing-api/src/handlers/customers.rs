// ============================================================================
// Invoicing API - Customer Handlers
// File: crates/invoicing-api/src/handlers/customers.rs
// ============================================================================

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use invoicing_core::domain::{CustomerPatch, NewCustomer};
use invoicing_shared::Pagination;

use crate::dto::{CustomerRead, InvoiceSubresource};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Json(payload): Json<NewCustomer>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerRead>>), ApiError> {
    let customer = state.customers.create(payload, &ctx).await?;
    let details = state.customers.get(&customer.id, &ctx).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(CustomerRead::from(&details)))))
}

/// GET /api/customers
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<Vec<CustomerRead>>>, ApiError> {
    let customers = state.customers.list(&ctx, pagination).await?;
    Ok(Json(ApiResponse::success(customers.iter().map(CustomerRead::from).collect())))
}

/// GET /api/customers/{id}
pub async fn get(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerRead>>, ApiError> {
    let details = state.customers.get(&id, &ctx).await?;
    Ok(Json(ApiResponse::success(CustomerRead::from(&details))))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Json<ApiResponse<CustomerRead>>, ApiError> {
    state.customers.update(&id, patch, &ctx).await?;
    let details = state.customers.get(&id, &ctx).await?;
    Ok(Json(ApiResponse::success(CustomerRead::from(&details))))
}

/// DELETE /api/customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.customers.delete(&id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/customers/{id}/invoices
pub async fn invoices(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<InvoiceSubresource>>>, ApiError> {
    let invoices = state.customers.invoices(&id, &ctx).await?;
    Ok(Json(ApiResponse::success(invoices.iter().map(InvoiceSubresource::from).collect())))
}
