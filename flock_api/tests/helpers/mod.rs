//! Shared test helpers for integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use flock_api::{build_router, AppState};
use flock_core::config::FlockConfig;
use flock_core::{models, FlockCore};

/// Test application backed by an in-memory database.
pub struct TestApp {
    pub router: Router,
    pub core: FlockCore,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A registered user with a live token.
pub struct TestUser {
    pub id: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = models::open_in_memory()
            .await
            .expect("Failed to open in-memory database");
        let core = FlockCore::with_connection(FlockConfig::new(std::env::temp_dir()), db);
        let router = build_router(AppState::new(core.clone()));

        Self { router, core }
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Token {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register `username` with a fixed password and log in.
    pub async fn register_and_login(&self, username: &str) -> TestUser {
        let registered = self
            .request(
                "POST",
                "/accounts/register",
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "password123",
                })),
                None,
            )
            .await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);

        let login = self
            .request(
                "POST",
                "/accounts/login",
                Some(json!({ "username": username, "password": "password123" })),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);

        TestUser {
            id: registered.body["id"].as_str().expect("id").to_string(),
            token: login.body["token"].as_str().expect("token").to_string(),
        }
    }

    pub async fn create_post(&self, author: &TestUser, title: &str) -> String {
        let response = self
            .request(
                "POST",
                "/posts",
                Some(json!({ "title": title, "content": format!("{title} body") })),
                Some(&author.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        response.body["id"].as_str().expect("post id").to_string()
    }

    pub async fn follow(&self, follower: &TestUser, followee: &TestUser) {
        let response = self
            .request(
                "POST",
                &format!("/users/{}/follow", followee.id),
                None,
                Some(&follower.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }
}
