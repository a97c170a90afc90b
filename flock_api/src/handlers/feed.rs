use axum::extract::{Query, State};
use axum::Json;

use flock_core::entity::post::Model as PostModel;

use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /feed
///
/// Without `limit` or `offset` the whole feed is returned.
pub async fn get_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<PostModel>>, ApiError> {
    let posts = if params.limit.is_none() && params.offset.is_none() {
        state.core.feed.get_feed(auth.id()).await?
    } else {
        let page = params.into_page_request(&state.config);
        state.core.feed.get_feed_page(auth.id(), page).await?
    };

    Ok(Json(posts))
}
