//! Post CRUD and likes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use flock_core::entity::{like::Model as LikeModel, post::Model as PostModel};
use flock_core::ids::PostId;
use flock_core::service::posts::PostQuery;

use crate::dto::{
    CreatePostRequest, MessageResponse, PostDetailResponse, PostFilterParams, UpdatePostRequest,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<PostFilterParams>,
) -> Result<Json<Vec<PostModel>>, ApiError> {
    let query = PostQuery {
        search: filter.search,
        author: filter.author,
        page: params.into_page_request(&state.config),
    };

    let posts = state.core.posts.list_posts(query).await?;
    Ok(Json(posts))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostModel>), ApiError> {
    let post = state
        .core
        .posts
        .create_post(auth.id(), req.title, req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = state.core.posts.get_post(id).await?;
    let like_count = state.core.engagement.like_count(id).await?;

    Ok(Json(PostDetailResponse { post, like_count }))
}

/// PATCH /posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PostId>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<PostModel>, ApiError> {
    let post = state
        .core
        .posts
        .update_post(auth.id(), id, req.title, req.content)
        .await?;

    Ok(Json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    state.core.posts.delete_post(auth.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PostId>,
) -> Result<(StatusCode, Json<LikeModel>), ApiError> {
    let like = state.core.engagement.like(auth.id(), id).await?;
    Ok((StatusCode::CREATED, Json(like)))
}

/// POST /posts/{id}/unlike
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PostId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.core.engagement.unlike(auth.id(), id).await?;
    Ok(Json(MessageResponse::new("You have unliked this post")))
}
