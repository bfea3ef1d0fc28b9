//! Route definitions for the `/characters` resource and its training
//! lifecycle endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{character, training};
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> delete
/// GET    /{id}/training-log         -> training_log
///
/// GET    /{id}/training-options     -> options
/// POST   /{id}/start-training       -> start
/// GET    /{id}/active-training      -> active
/// POST   /{id}/cancel-training      -> cancel
/// POST   /{id}/finish-training      -> finish
/// POST   /{id}/whistle-to-ticket    -> whistle_to_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list).post(character::create))
        .route("/{id}", get(character::get_by_id).delete(character::delete))
        .route("/{id}/training-log", get(character::training_log))
        .route("/{id}/training-options", get(training::options))
        .route("/{id}/start-training", post(training::start))
        .route("/{id}/active-training", get(training::active))
        .route("/{id}/cancel-training", post(training::cancel))
        .route("/{id}/finish-training", post(training::finish))
        .route("/{id}/whistle-to-ticket", post(training::whistle_to_ticket))
}
