use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the bearer token, validates it, and loads the caller's account.
/// An inactive account is rejected with Forbidden on every request, distinct
/// from the Unauthorized cases.
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
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Could not validate credentials".into()))?;

        let user = User::find_by_username(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".into()))?;

        if !user.is_active {
            return Err(ApiError::Forbidden("Inactive user".into()));
        }

        Ok(CurrentUser(user))
    }
}
