//! Comments on posts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use flock_core::entity::comment::Model as CommentModel;
use flock_core::ids::{CommentId, PostId};

use crate::dto::CommentRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<CommentModel>>, ApiError> {
    let page = params.into_page_request(&state.config);
    let comments = state.core.posts.list_comments(post_id, page).await?;
    Ok(Json(comments))
}

/// POST /posts/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<PostId>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentModel>), ApiError> {
    let comment = state
        .core
        .engagement
        .comment(auth.id(), post_id, req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> Result<Json<CommentModel>, ApiError> {
    let comment = state.core.posts.get_comment(id).await?;
    Ok(Json(comment))
}

/// PATCH /comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CommentId>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<CommentModel>, ApiError> {
    let comment = state
        .core
        .posts
        .update_comment(auth.id(), id, req.content)
        .await?;

    Ok(Json(comment))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CommentId>,
) -> Result<StatusCode, ApiError> {
    state.core.posts.delete_comment(auth.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
