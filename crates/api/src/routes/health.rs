use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use striker_core::role::PlayerRole;

use crate::engine::training::load_catalog;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when both the database and the catalog are usable, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// The catalog loads and gives every role a special training.
    pub catalog_healthy: bool,
    /// Roles that would fail to get a menu today.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uncovered_roles: Vec<PlayerRole>,
}

/// GET /health -- database reachability plus training catalog sanity.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = striker_db::health_check(&state.pool).await.is_ok();

    let (catalog_healthy, uncovered_roles) = if db_healthy {
        match load_catalog(&state).await {
            Ok(catalog) => {
                let uncovered = catalog.roles_without_special();
                (uncovered.is_empty(), uncovered)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Training catalog failed to load");
                (false, Vec::new())
            }
        }
    } else {
        (false, Vec::new())
    };

    if !uncovered_roles.is_empty() {
        tracing::warn!(roles = ?uncovered_roles, "Roles without a special training");
    }

    let status = if db_healthy && catalog_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        catalog_healthy,
        uncovered_roles,
    })
}

/// Root-level health route; kept outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
