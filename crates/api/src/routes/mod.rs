pub mod character;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /training-catalog                               list (public)
///
/// /characters                                     list, create
/// /characters/{id}                                get, delete (?hard=true)
/// /characters/{id}/training-log                   claimed trainings (paginated)
/// /characters/{id}/training-options               today's three options
/// /characters/{id}/start-training                 start (POST)
/// /characters/{id}/active-training                active training status
/// /characters/{id}/cancel-training                cancel (POST)
/// /characters/{id}/finish-training                claim rewards (POST)
/// /characters/{id}/whistle-to-ticket              convert a whistle (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/training-catalog", get(handlers::catalog::list))
        .nest("/characters", character::router())
}
