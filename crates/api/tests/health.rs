//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get_anonymous};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anonymous(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["catalog_healthy"], true);
    assert!(json.get("uncovered_roles").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_degraded_when_role_has_no_special(pool: PgPool) {
    sqlx::query("DELETE FROM training_list WHERE name = 'Saving'")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get_anonymous(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["catalog_healthy"], false);
    assert_eq!(json["uncovered_roles"], serde_json::json!(["goalkeeper"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anonymous(app.router(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anonymous(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_returns_correct_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/characters")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn training_catalog_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_anonymous(app.router(), "/api/v1/training-catalog").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 8);
    assert_eq!(entries.iter().filter(|e| e["mandatory"] == true).count(), 4);
    assert_eq!(entries[4]["name"], "Gym");
    assert_eq!(entries[4]["duration_secs"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_lists_only_client_methods(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/characters/1/finish-training")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.router().oneshot(request).await.unwrap();
    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(!allow_methods.contains("PUT"), "got: {allow_methods}");
    assert!(!allow_methods.contains("PATCH"), "got: {allow_methods}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_route_has_no_cors(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("Origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
