//! Route definitions for the Flock HTTP API.
//!
//! Routes are grouped by domain; every group receives `AppState` through
//! axum's `State` extractor.

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(account_routes())
        .merge(user_routes())
        .merge(feed_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(notification_routes())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Registration, login and the caller's profile
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/register", post(handlers::accounts::register))
        .route("/accounts/login", post(handlers::accounts::login))
        .route(
            "/accounts/profile",
            get(handlers::accounts::get_profile).patch(handlers::accounts::update_profile),
        )
}

/// Public profiles and the follow graph
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(handlers::users::get_user))
        .route("/users/{id}/following", get(handlers::users::following))
        .route("/users/{id}/followers", get(handlers::users::followers))
        .route("/users/{id}/follow", post(handlers::users::follow))
        .route("/users/{id}/unfollow", post(handlers::users::unfollow))
}

fn feed_routes() -> Router<AppState> {
    Router::new().route("/feed", get(handlers::feed::get_feed))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::posts::get_post)
                .patch(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route("/posts/{id}/like", post(handlers::posts::like_post))
        .route("/posts/{id}/unlike", post(handlers::posts::unlike_post))
        .route(
            "/posts/{id}/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/{id}",
        get(handlers::comments::get_comment)
            .patch(handlers::comments::update_comment)
            .delete(handlers::comments::delete_comment),
    )
}

/// The caller's notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(handlers::notifications::unread_count),
        )
        .route(
            "/notifications/read-all",
            post(handlers::notifications::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notifications::mark_read),
        )
}
