//! Handlers for the `/characters` resource.
//!
//! Every query is scoped to the authenticated owner. A character owned by
//! someone else answers exactly like one that does not exist.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use striker_core::character::CharacterState;
use striker_core::error::CoreError;
use striker_core::types::{game_date, DbId};
use striker_db::models::character::{Character, CreateCharacter};
use striker_db::models::training::TrainingLog;
use striker_db::repositories::{CharacterRepo, TrainingLogRepo};

use crate::engine::training::load_character;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{DeleteParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    pub character: Character,
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<CharacterResponse>)> {
    let input = input.validated()?;
    let today = game_date(state.clock.now());
    let initial = CharacterState::new(0, input.role, state.config.game.starter_whistles, today);

    let character = CharacterRepo::create(&state.pool, user.user_id, &input, &initial).await?;
    tracing::info!(
        character_id = character.id,
        owner_id = user.user_id,
        role = %input.role,
        "Character created",
    );
    Ok((StatusCode::CREATED, Json(CharacterResponse { character })))
}

/// GET /api/v1/characters
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    let characters = CharacterRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: characters }))
}

/// GET /api/v1/characters/{id}
///
/// Applies the daily ticket reset before answering.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Character>>> {
    let character = load_character(&state, user.user_id, id).await?;
    Ok(Json(DataResponse { data: character }))
}

/// DELETE /api/v1/characters/{id}[?hard=true]
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    let deleted = if params.hard {
        CharacterRepo::hard_delete(&state.pool, id, user.user_id).await?
    } else {
        CharacterRepo::soft_delete(&state.pool, id, user.user_id).await?
    };
    if deleted {
        tracing::info!(character_id = id, hard = params.hard, "Character deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
    }
}

/// GET /api/v1/characters/{id}/training-log
///
/// Claimed trainings, most recent first.
pub async fn training_log(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<TrainingLog>>>> {
    CharacterRepo::find_owned(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let limit = striker_db::clamp_limit(params.limit);
    let offset = striker_db::clamp_offset(params.offset);
    let logs = TrainingLogRepo::list_archived(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: logs }))
}
