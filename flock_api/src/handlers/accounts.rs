//! Registration, login and the caller's own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::dto::{
    LoginRequest, ProfileResponse, RegisterRequest, TokenResponse, UpdateProfileRequest,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /accounts/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiError> {
    let user = state
        .core
        .accounts
        .register(req.username, req.email, req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /accounts/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .core
        .accounts
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(TokenResponse { token: token.key }))
}

/// GET /accounts/profile
pub async fn get_profile(auth: AuthUser) -> Json<ProfileResponse> {
    Json(auth.0.into())
}

/// PATCH /accounts/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .core
        .accounts
        .update_profile(auth.id(), req.email, req.bio)
        .await?;

    Ok(Json(user.into()))
}
