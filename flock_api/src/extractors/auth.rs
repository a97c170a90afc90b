//! `AuthUser` extractor: resolves the token in the Authorization header to a user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use flock_core::entity::user::Model as UserModel;
use flock_core::ids::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Accepts `Token <key>` and `Bearer <key>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserModel);

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }
}

impl std::ops::Deref for AuthUser {
    type Target = UserModel;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Authentication credentials were not provided"))?;

        let key = header
            .strip_prefix("Token ")
            .or_else(|| header.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))?;

        let user = state.core.accounts.authenticate(key).await?;

        Ok(AuthUser(user))
    }
}
