//! Handlers for the training lifecycle of a character.
//!
//! ```text
//! GET  /characters/{id}/training-options
//! POST /characters/{id}/start-training
//! GET  /characters/{id}/active-training
//! POST /characters/{id}/cancel-training
//! POST /characters/{id}/finish-training
//! POST /characters/{id}/whistle-to-ticket
//! ```

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use striker_core::catalog::TrainingDefinition;
use striker_core::rewards::StatGain;
use striker_core::stats::StatKind;
use striker_core::training::TrainingStatus;
use striker_core::types::{DbId, Timestamp};
use striker_db::models::character::Character;
use striker_db::models::training::TrainingLog;

use crate::engine::training as engine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub options: Vec<TrainingDefinition>,
}

/// GET /api/v1/characters/{id}/training-options
pub async fn options(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OptionsResponse>> {
    let options = engine::todays_options(&state, user.user_id, id).await?;
    Ok(Json(OptionsResponse { options }))
}

#[derive(Debug, Deserialize)]
pub struct StartTrainingRequest {
    #[serde(rename = "trainingListId", alias = "training_list_id")]
    pub training_list_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub log: TrainingLog,
    pub tickets_left: i32,
}

/// POST /api/v1/characters/{id}/start-training
pub async fn start(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<StartTrainingRequest>,
) -> AppResult<Json<StartResponse>> {
    let started = engine::start(&state, user.user_id, id, input.training_list_id).await?;
    Ok(Json(StartResponse {
        log: started.log,
        tickets_left: started.tickets_left,
    }))
}

#[derive(Debug, Serialize)]
pub struct ActiveTrainingDetails {
    pub log_id: Option<DbId>,
    pub training_list_id: DbId,
    pub name: Option<String>,
    pub stat_affected: Option<StatKind>,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct ActiveResponse {
    pub active: bool,
    pub status: TrainingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<ActiveTrainingDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ms: Option<i64>,
}

/// GET /api/v1/characters/{id}/active-training
pub async fn active(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ActiveResponse>> {
    let view = engine::active(&state, user.user_id, id).await?;
    let training = view.active.training.map(|t| ActiveTrainingDetails {
        log_id: t.log_id,
        training_list_id: t.training_id,
        name: view.definition.as_ref().map(|d| d.name.clone()),
        stat_affected: view.definition.as_ref().map(|d| d.stat_affected),
        started_at: t.started_at,
        finished_at: t.finished_at,
    });
    Ok(Json(ActiveResponse {
        active: view.active.active,
        status: view.active.status,
        training,
        remaining_ms: view.active.remaining_ms,
    }))
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<i32>,
    pub forfeited_rewards: bool,
}

/// POST /api/v1/characters/{id}/cancel-training
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CancelResponse>> {
    let outcome = engine::cancel(&state, user.user_id, id).await?;
    Ok(Json(CancelResponse {
        canceled: outcome.canceled,
        tickets: outcome.tickets,
        forfeited_rewards: outcome.forfeited_rewards,
    }))
}

#[derive(Debug, Serialize)]
pub struct RewardsBody {
    pub xp: i64,
    pub currency: i64,
    pub stat: StatGain,
    pub levels_gained: i32,
}

#[derive(Debug, Serialize)]
pub struct FinishResponse {
    pub rewards: RewardsBody,
    pub log: TrainingLog,
    pub player: Character,
}

/// POST /api/v1/characters/{id}/finish-training
pub async fn finish(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<FinishResponse>> {
    let finished = engine::finish(&state, user.user_id, id).await?;
    Ok(Json(FinishResponse {
        rewards: RewardsBody {
            xp: finished.rewards.xp,
            currency: finished.rewards.currency,
            stat: finished.rewards.stat,
            levels_gained: finished.levels_gained,
        },
        log: finished.log,
        player: finished.character,
    }))
}

#[derive(Debug, Serialize)]
pub struct WhistleResponse {
    pub character: Character,
}

/// POST /api/v1/characters/{id}/whistle-to-ticket
pub async fn whistle_to_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WhistleResponse>> {
    let character = engine::convert_whistle(&state, user.user_id, id).await?;
    Ok(Json(WhistleResponse { character }))
}
