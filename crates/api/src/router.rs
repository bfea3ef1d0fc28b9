//! Application router shared by `main.rs` and the integration tests.
//!
//! Two route groups with different exposure:
//!
//! - `/health` is for orchestrators and load balancers. No CORS.
//! - `/api/v1` is the game client's surface. CORS is restricted to the
//!   configured origins and to the verbs the training endpoints use.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Verbs the game client sends: reads, lifecycle actions, character deletion.
const CLIENT_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::DELETE];

/// Build the full application [`Router`].
///
/// Layers shared by both groups, outermost first: request ID assignment,
/// tracing, request ID propagation, timeout, panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let client_api = routes::api_routes().layer(build_cors_layer(config));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", client_api)
        .layer(CatchPanicLayer::new())
        // A slow row lock must not pin a connection forever.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

/// CORS for the client API group.
///
/// Origins that fail to parse are logged and skipped; with none left the
/// layer allows no cross-origin caller at all.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(origin = %origin, error = %err, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CLIENT_METHODS)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
