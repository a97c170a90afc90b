//! Maps service errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use flock_core::service::{
    accounts::AccountsServiceError, engagement::EngagementServiceError, feed::FeedServiceError,
    notifications::NotificationsServiceError, posts::PostsServiceError,
    relationships::RelationshipsServiceError,
};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_OPERATION", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "ALREADY_EXISTS", message)
    }

    /// Log the underlying failure and hide it from the client.
    pub fn internal(error: &dyn std::error::Error) -> Self {
        tracing::error!(error = %error, source = ?error.source(), "Internal server error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: self.code.to_string(),
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<AccountsServiceError> for ApiError {
    fn from(error: AccountsServiceError) -> Self {
        match error {
            AccountsServiceError::UserNotFound => ApiError::not_found(error.to_string()),
            AccountsServiceError::UsernameTaken => ApiError::conflict(error.to_string()),
            AccountsServiceError::InvalidInput(_) => ApiError::bad_request(error.to_string()),
            AccountsServiceError::InvalidCredentials | AccountsServiceError::InvalidToken => {
                ApiError::unauthorized(error.to_string())
            }
            AccountsServiceError::DbError(_) | AccountsServiceError::PasswordHash(_) => {
                ApiError::internal(&error)
            }
        }
    }
}

impl From<RelationshipsServiceError> for ApiError {
    fn from(error: RelationshipsServiceError) -> Self {
        match error {
            RelationshipsServiceError::UserNotFound => ApiError::not_found(error.to_string()),
            RelationshipsServiceError::SelfFollow => ApiError::bad_request(error.to_string()),
            RelationshipsServiceError::DbError(_) => ApiError::internal(&error),
        }
    }
}

impl From<PostsServiceError> for ApiError {
    fn from(error: PostsServiceError) -> Self {
        match error {
            PostsServiceError::PostNotFound | PostsServiceError::CommentNotFound => {
                ApiError::not_found(error.to_string())
            }
            PostsServiceError::Blank(_) => ApiError::bad_request(error.to_string()),
            PostsServiceError::NotAuthor => ApiError::forbidden(error.to_string()),
            PostsServiceError::DbError(_) => ApiError::internal(&error),
        }
    }
}

impl From<EngagementServiceError> for ApiError {
    fn from(error: EngagementServiceError) -> Self {
        match error {
            EngagementServiceError::PostNotFound | EngagementServiceError::NotLiked => {
                ApiError::not_found(error.to_string())
            }
            EngagementServiceError::AlreadyLiked | EngagementServiceError::BlankComment => {
                ApiError::bad_request(error.to_string())
            }
            EngagementServiceError::DbError(_) => ApiError::internal(&error),
        }
    }
}

impl From<FeedServiceError> for ApiError {
    fn from(error: FeedServiceError) -> Self {
        ApiError::internal(&error)
    }
}

impl From<NotificationsServiceError> for ApiError {
    fn from(error: NotificationsServiceError) -> Self {
        match error {
            NotificationsServiceError::NotificationNotFound => {
                ApiError::not_found(error.to_string())
            }
            NotificationsServiceError::DbError(_) => ApiError::internal(&error),
        }
    }
}
