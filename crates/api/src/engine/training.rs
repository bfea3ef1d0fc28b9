//! Each mutating operation runs in one transaction:
//!
//! 1. lock the character row (`FOR UPDATE`) scoped to its owner,
//! 2. rebuild a [`CharacterState`] from the row and its active log,
//! 3. apply the domain operation,
//! 4. write the state and the log change back, then commit.
//!
//! Any error drops the transaction, so nothing partial is persisted.

use sqlx::PgConnection;
use striker_core::catalog::{TrainingCatalog, TrainingDefinition};
use striker_core::character::CharacterState;
use striker_core::daily_reset::ensure_daily_reset;
use striker_core::error::{CoreError, TrainingError};
use striker_core::options::ensure_menu;
use striker_core::rewards::Rewards;
use striker_core::training::{self, ActiveTraining, CancelOutcome};
use striker_core::types::{game_date, DbId};
use striker_db::models::character::Character;
use striker_db::models::training::TrainingLog;
use striker_db::repositories::{CharacterRepo, TrainingListRepo, TrainingLogRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Result of a successful start.
#[derive(Debug)]
pub struct Started {
    pub log: TrainingLog,
    pub tickets_left: i32,
}

/// Result of a successful finish.
#[derive(Debug)]
pub struct Finished {
    pub rewards: Rewards,
    pub levels_gained: i32,
    pub log: TrainingLog,
    pub character: Character,
}

/// The active training plus its catalog entry, when there is one.
#[derive(Debug)]
pub struct ActiveView {
    pub active: ActiveTraining,
    pub definition: Option<TrainingDefinition>,
}

/// Load and validate the training catalog.
pub async fn load_catalog(state: &AppState) -> AppResult<TrainingCatalog> {
    let rows = TrainingListRepo::list_all(&state.pool).await?;
    let entries = rows
        .into_iter()
        .map(TrainingDefinition::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TrainingCatalog::new(entries)?)
}

fn not_found(character_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Character",
        id: character_id,
    })
}

/// Lock the owner's character row and rebuild its domain state.
async fn lock_state(
    conn: &mut PgConnection,
    character_id: DbId,
    owner_id: DbId,
) -> AppResult<CharacterState> {
    let character = CharacterRepo::lock_owned(&mut *conn, character_id, owner_id)
        .await?
        .ok_or_else(|| not_found(character_id))?;
    let active = TrainingLogRepo::find_active(&mut *conn, character_id).await?;
    Ok(character.to_state(active.map(|log| log.to_instance()))?)
}

/// Today's three options, drawing and storing a fresh menu when needed.
pub async fn todays_options(
    state: &AppState,
    owner_id: DbId,
    character_id: DbId,
) -> AppResult<Vec<TrainingDefinition>> {
    let catalog = load_catalog(state).await?;
    let today = game_date(state.clock.now());

    let mut tx = state.pool.begin().await?;
    let mut character = lock_state(&mut *tx, character_id, owner_id).await?;

    let reset = ensure_daily_reset(&mut character, today);
    let menu = ensure_menu(&mut character, &catalog, today, &mut rand::rng())?;
    if reset || menu.regenerated {
        CharacterRepo::save_state(&mut *tx, &character).await?;
    }
    tx.commit().await?;

    if reset {
        tracing::info!(character_id, %today, "Daily tickets reset");
    }
    if menu.regenerated {
        tracing::info!(character_id, %today, "Drew new training options");
    }
    Ok(menu.options)
}

/// Begin a training, spending one ticket.
pub async fn start(
    state: &AppState,
    owner_id: DbId,
    character_id: DbId,
    training_id: DbId,
) -> AppResult<Started> {
    let catalog = load_catalog(state).await?;
    let now = state.clock.now();

    let mut tx = state.pool.begin().await?;
    let mut character = lock_state(&mut *tx, character_id, owner_id).await?;

    if ensure_daily_reset(&mut character, game_date(now)) {
        tracing::info!(character_id, "Daily tickets reset before start");
    }
    let instance = training::start(&mut character, &catalog, training_id, now)?;

    let saved = CharacterRepo::save_state(&mut *tx, &character).await?;
    let log = TrainingLogRepo::insert_active(&mut *tx, character_id, &instance).await?;
    tx.commit().await?;

    tracing::info!(
        character_id,
        training_id,
        log_id = log.id,
        tickets_left = saved.tickets,
        "Training started",
    );
    Ok(Started {
        log,
        tickets_left: saved.tickets,
    })
}

/// Report the active training without changing anything.
pub async fn active(state: &AppState, owner_id: DbId, character_id: DbId) -> AppResult<ActiveView> {
    let now = state.clock.now();
    let character = CharacterRepo::find_owned(&state.pool, character_id, owner_id)
        .await?
        .ok_or_else(|| not_found(character_id))?;

    let mut conn = state.pool.acquire().await?;
    let log = TrainingLogRepo::find_active(&mut *conn, character_id).await?;
    drop(conn);

    let snapshot = character.to_state(log.map(|l| l.to_instance()))?;
    let active = training::get_active(&snapshot, now);
    tracing::debug!(character_id, status = ?active.status, "Active training read");

    let definition = match &active.training {
        Some(instance) => TrainingListRepo::find_by_id(&state.pool, instance.training_id)
            .await?
            .map(TrainingDefinition::try_from)
            .transpose()?,
        None => None,
    };
    Ok(ActiveView { active, definition })
}

/// Drop the active training and refund one ticket.
pub async fn cancel(state: &AppState, owner_id: DbId, character_id: DbId) -> AppResult<CancelOutcome> {
    let now = state.clock.now();
    let policy = state.config.game.refund_policy;

    let mut tx = state.pool.begin().await?;
    let mut character = lock_state(&mut *tx, character_id, owner_id).await?;

    let outcome = training::cancel(&mut character, now, policy);
    let Some(removed) = &outcome.removed else {
        return Ok(outcome);
    };

    if let Some(log_id) = removed.log_id {
        TrainingLogRepo::delete_active(&mut *tx, log_id).await?;
    }
    CharacterRepo::save_state(&mut *tx, &character).await?;
    tx.commit().await?;

    if outcome.forfeited_rewards {
        tracing::warn!(
            character_id,
            training_id = removed.training_id,
            "Finished training canceled before claiming; rewards forfeited",
        );
    } else {
        tracing::info!(character_id, training_id = removed.training_id, "Training canceled");
    }
    Ok(outcome)
}

/// Claim a finished training: grant rewards, archive the log, redraw the menu.
pub async fn finish(state: &AppState, owner_id: DbId, character_id: DbId) -> AppResult<Finished> {
    let catalog = load_catalog(state).await?;
    let now = state.clock.now();

    let mut tx = state.pool.begin().await?;
    let mut character = lock_state(&mut *tx, character_id, owner_id).await?;

    let outcome = training::finish(&mut character, &catalog, now, &mut rand::rng())?;
    let log_id = outcome
        .archived
        .log_id
        .ok_or(TrainingError::NoActiveTraining)?;

    let log = TrainingLogRepo::archive(&mut *tx, log_id, &outcome.rewards)
        .await?
        .ok_or(TrainingError::NoActiveTraining)?;
    let saved = CharacterRepo::save_state(&mut *tx, &character).await?;
    tx.commit().await?;

    tracing::info!(
        character_id,
        training_id = outcome.training.id,
        xp = outcome.rewards.xp,
        currency = outcome.rewards.currency,
        stat = %outcome.rewards.stat.name,
        stat_gain = outcome.rewards.stat.value,
        level = saved.level,
        levels_gained = outcome.levels_gained,
        "Training rewards granted",
    );
    Ok(Finished {
        rewards: outcome.rewards,
        levels_gained: outcome.levels_gained,
        log,
        character: saved,
    })
}

/// Spend one whistle for one extra ticket.
pub async fn convert_whistle(
    state: &AppState,
    owner_id: DbId,
    character_id: DbId,
) -> AppResult<Character> {
    let today = game_date(state.clock.now());

    let mut tx = state.pool.begin().await?;
    let mut character = lock_state(&mut *tx, character_id, owner_id).await?;

    if ensure_daily_reset(&mut character, today) {
        tracing::info!(character_id, %today, "Daily tickets reset before whistle conversion");
    }
    training::convert_whistle_to_ticket(&mut character)?;

    let saved = CharacterRepo::save_state(&mut *tx, &character).await?;
    tx.commit().await?;

    tracing::info!(
        character_id,
        tickets = saved.tickets,
        whistles = saved.whistles,
        "Whistle converted to ticket",
    );
    Ok(saved)
}

/// Fetch a character, applying the daily ticket reset first.
pub async fn load_character(
    state: &AppState,
    owner_id: DbId,
    character_id: DbId,
) -> AppResult<Character> {
    let today = game_date(state.clock.now());
    CharacterRepo::reset_tickets_if_needed(
        &state.pool,
        character_id,
        owner_id,
        today,
        striker_core::daily_reset::DAILY_TICKETS,
    )
    .await?
    .ok_or_else(|| not_found(character_id))
}
