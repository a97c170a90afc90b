//! Request and response bodies.

use serde::{Deserialize, Serialize};

use flock_core::entity::{post::Model as PostModel, user::Model as UserModel};
use flock_core::ids::UserId;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// The caller's own account, email included.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub created_at: String,
}

impl From<UserModel> for ProfileResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

/// Someone else's account as seen by anyone.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: UserId,
    pub username: String,
    pub bio: String,
}

impl From<UserModel> for PublicUserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            bio: user.bio,
        }
    }
}

/// A public profile plus how many posts the user has written.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub user: PublicUserResponse,
    pub post_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostModel,
    pub like_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilterParams {
    pub search: Option<String>,
    pub author: Option<UserId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationFilterParams {
    #[serde(default)]
    pub unread: bool,
}
