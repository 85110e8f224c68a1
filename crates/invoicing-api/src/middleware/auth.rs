//! Bearer-token extractors.
//!
//! Both extractors produce the `RequestContext` handed to the services: the
//! request method plus the identity decoded from `Authorization: Bearer`.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use invoicing_core::lifecycle::{HttpMethod, RequestContext};

use crate::error::ApiError;
use crate::state::AppState;

/// Requires a valid access token; rejects with 401 otherwise.
pub struct CurrentUser(pub RequestContext);

/// Accepts anonymous requests. A token that is present but invalid is still
/// rejected.
pub struct MaybeUser(pub RequestContext);

fn method_of(parts: &Parts) -> HttpMethod {
    parts.method.as_str().parse().unwrap_or(HttpMethod::Get)
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| Some(token.trim()))
        .ok_or_else(|| ApiError::Unauthorized("Malformed Authorization header".to_string()))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
        let identity = state.auth.authenticate(token).await?;
        Ok(Self(RequestContext::authenticated(method_of(parts), identity)))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(parts)? {
            Some(token) => Some(state.auth.authenticate(token).await?),
            None => None,
        };
        Ok(Self(RequestContext::new(method_of(parts), identity)))
    }
}
