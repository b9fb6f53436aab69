use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::error;

use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the authenticated user from `Authorization: Bearer <token>`.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing access token".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("missing access token".into()))?;

        let user = state
            .auth
            .resolve(token)
            .await
            .map_err(|e| {
                error!(error = %e, "credential lookup failed");
                ApiError::Internal("credential lookup failed".into())
            })?
            .ok_or_else(|| ApiError::Forbidden("invalid access token".into()))?;

        Ok(CurrentUser(user))
    }
}
