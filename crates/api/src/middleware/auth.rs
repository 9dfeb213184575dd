//! Extractor for the user viewing the dashboard.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use prmon_core::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The user identified by an optional `Authorization: Bearer <jwt>` header.
///
/// A missing header yields `CurrentUser(None)`: reads fall back to defaults
/// and writes fail with a missing-context error. A present but malformed or
/// invalid token is rejected with 401.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<String>);

impl CurrentUser {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get("authorization") else {
            return Ok(CurrentUser(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(CurrentUser(Some(claims.sub)))
    }
}
