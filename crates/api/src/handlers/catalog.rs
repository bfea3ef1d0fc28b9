//! Handler for the read-only training catalog.

use axum::extract::State;
use axum::Json;
use striker_core::catalog::TrainingDefinition;

use crate::engine::training::load_catalog;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/training-catalog
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TrainingDefinition>>>> {
    let catalog = load_catalog(&state).await?;
    Ok(Json(DataResponse {
        data: catalog.entries().to_vec(),
    }))
}
