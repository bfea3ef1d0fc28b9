#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use striker_api::auth::jwt::{generate_access_token, JwtConfig};
use striker_api::config::{GameConfig, ServerConfig};
use striker_api::router::build_app_router;
use striker_api::state::AppState;
use striker_core::clock::ManualClock;
use striker_core::types::{DbId, Timestamp};

/// Catalog ids as seeded by the migrations.
pub const SHOOTING_ID: i64 = 4;
pub const GYM_ID: i64 = 5;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        game: GameConfig::default(),
    }
}

/// 08:00 UTC on a fixed day, far from midnight.
pub fn start_time() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
}

/// The router plus the clock it reads, so tests can move time.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn advance_secs(&self, secs: i64) {
        self.clock.advance(chrono::Duration::seconds(secs));
    }

    pub fn token_for(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.config.jwt).unwrap()
    }
}

/// Build the full application router (same middleware stack as production)
/// with a manual clock.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> TestApp {
    let clock = Arc::new(ManualClock::new(start_time()));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: clock.clone(),
    };
    TestApp {
        router: build_app_router(state, &config),
        clock,
        config,
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(request("GET", uri, Some(token), None)).await.unwrap()
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(request("GET", uri, None, None)).await.unwrap()
}

pub async fn post(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(request("POST", uri, Some(token), None)).await.unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(request("POST", uri, Some(token), Some(body)))
        .await
        .unwrap()
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(request("DELETE", uri, Some(token), None))
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a character for `token`'s user and return its id.
pub async fn create_character(app: &TestApp, token: &str, name: &str, role: &str) -> i64 {
    let response = post_json(
        app.router(),
        "/api/v1/characters",
        token,
        serde_json::json!({ "name": name, "role": role }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["character"]["id"].as_i64().unwrap()
}

/// Start `training_id` and assert it succeeded.
pub async fn start_training(app: &TestApp, token: &str, character_id: i64, training_id: i64) -> serde_json::Value {
    let response = post_json(
        app.router(),
        &format!("/api/v1/characters/{character_id}/start-training"),
        token,
        serde_json::json!({ "trainingListId": training_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

pub async fn fetch_character(app: &TestApp, token: &str, character_id: i64) -> serde_json::Value {
    let response = get(app.router(), &format!("/api/v1/characters/{character_id}"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}
