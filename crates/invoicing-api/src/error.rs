// ============================================================================
// Invoicing API - HTTP Errors
// File: crates/invoicing-api/src/error.rs
// ============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use invoicing_core::error::DomainError;

use crate::response::{ApiResponse, Violation};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UserNotFound(_) | DomainError::CustomerNotFound(_) | DomainError::InvoiceNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".to_string()),
            DomainError::Unauthenticated => ApiError::Unauthorized("Authentication required".to_string()),
            DomainError::Forbidden(msg) => ApiError::Forbidden(msg),
            DomainError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            DomainError::Validation(errors) => ApiError::Validation(errors),
            DomainError::MethodNotAllowed { .. } => ApiError::MethodNotAllowed(err.to_string()),
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

fn violations(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| Violation {
                property_path: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.property_path.cmp(&b.property_path));
    violations
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ApiResponse::<()>::error("UNAUTHORIZED", &msg))
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ApiResponse::error("FORBIDDEN", &msg))
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ApiResponse::error("NOT_FOUND", &msg))
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ApiResponse::error("CONFLICT", &msg))
            }
            ApiError::Validation(errors) => {
                tracing::warn!("Validation failed: {}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse::error_with_violations("VALIDATION_ERROR", "Validation failed", violations(&errors)),
                )
            }
            ApiError::MethodNotAllowed(msg) => {
                tracing::warn!("Method not allowed: {}", msg);
                (StatusCode::METHOD_NOT_ALLOWED, ApiResponse::error("METHOD_NOT_ALLOWED", &msg))
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
