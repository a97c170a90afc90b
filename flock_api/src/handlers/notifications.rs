//! Notification inbox handlers.

use axum::extract::{Path, Query, State};
use axum::Json;

use flock_core::entity::notification::Model as NotificationModel;
use flock_core::ids::NotificationId;

use crate::dto::{CountResponse, NotificationFilterParams};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<NotificationFilterParams>,
) -> Result<Json<Vec<NotificationModel>>, ApiError> {
    let page = params.into_page_request(&state.config);
    let notifications = state
        .core
        .notifications
        .list(auth.id(), filter.unread, page)
        .await?;

    Ok(Json(notifications))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.core.notifications.unread_count(auth.id()).await?;
    Ok(Json(CountResponse { count }))
}

/// POST /notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<NotificationModel>, ApiError> {
    let notification = state.core.notifications.mark_read(auth.id(), id).await?;
    Ok(Json(notification))
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.core.notifications.mark_all_read(auth.id()).await?;
    Ok(Json(CountResponse { count }))
}
