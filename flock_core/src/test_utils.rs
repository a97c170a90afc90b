use sea_orm::DatabaseConnection;

use crate::{
    entity::prelude::*,
    ids::{PostId, UserId},
    models,
};

/// Create a fresh, isolated in-memory SQLite database with migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    models::open_in_memory()
        .await
        .expect("Failed to create in-memory database")
}

/// Insert a user row directly. The password hash is a placeholder, so these
/// users cannot log in; use `AccountsService::register` when that matters.
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> UserModel {
    let user = UserActiveModel {
        id: Set(UserId::new()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("!".to_string()),
        bio: Set(String::new()),
        created_at: Set(timestamp_now()),
    };

    User::insert(user)
        .exec_with_returning(db)
        .await
        .expect("Failed to insert user")
}

pub async fn create_test_post(db: &DatabaseConnection, author: UserId, title: &str) -> PostModel {
    let now = timestamp_now();
    let post = PostActiveModel {
        id: Set(PostId::new()),
        author_id: Set(author),
        title: Set(title.to_string()),
        content: Set(format!("{title} body")),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };

    Post::insert(post)
        .exec_with_returning(db)
        .await
        .expect("Failed to insert post")
}

pub async fn follow(db: &DatabaseConnection, follower: UserId, followee: UserId) {
    let edge = FollowActiveModel {
        follower_id: Set(follower),
        followee_id: Set(followee),
        created_at: Set(timestamp_now()),
    };
    Follow::insert(edge)
        .exec(db)
        .await
        .expect("Failed to insert follow");
}
