//! Bearer token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::error::UNAUTHORIZED_MESSAGE;
use crate::api::types::ApiError;
use crate::domain::user::Identity;
use crate::infrastructure::auth::strip_bearer;

/// Extractor that requires a valid `Authorization: Bearer <token>` header
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub Identity);

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        let identity = state
            .auth_service
            .authenticate(token)
            .await
            .map_err(ApiError::from)
            .inspect_err(|e| debug!(error = %e, "Bearer authentication failed"))?;

        Ok(RequireIdentity(identity))
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(strip_bearer)
        .ok_or_else(|| ApiError::unauthorized(UNAUTHORIZED_MESSAGE))
}
