//! Public user lookups and the follow graph.

use axum::extract::{Path, State};
use axum::Json;

use flock_core::ids::UserId;

use crate::dto::{MessageResponse, PublicUserResponse, UserDetailResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let user = state.core.accounts.get_user(id).await?;
    let post_count = state.core.posts.count_posts_by_user(id).await?;

    Ok(Json(UserDetailResponse {
        user: user.into(),
        post_count,
    }))
}

/// GET /users/{id}/following
pub async fn following(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<PublicUserResponse>>, ApiError> {
    let users = state.core.relationships.following(id).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /users/{id}/followers
pub async fn followers(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<PublicUserResponse>>, ApiError> {
    let users = state.core.relationships.followers(id).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /users/{id}/follow
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let target = state.core.relationships.follow(auth.id(), id).await?;
    Ok(Json(MessageResponse::new(format!(
        "You are now following {}",
        target.username
    ))))
}

/// POST /users/{id}/unfollow
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let target = state.core.relationships.unfollow(auth.id(), id).await?;
    Ok(Json(MessageResponse::new(format!(
        "You have unfollowed {}",
        target.username
    ))))
}
