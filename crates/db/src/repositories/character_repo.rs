//! Repository for the `characters` table.
//!
//! Every lookup is scoped by `owner_id`, so a character owned by someone
//! else is indistinguishable from one that does not exist.

use sqlx::{PgConnection, PgPool};
use striker_core::character::CharacterState;
use striker_core::types::{DbId, GameDate};

use crate::models::character::{Character, CreateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, role_id, level, xp, dollars, \
     strength, speed, stamina, special_stat, whistles, tickets, last_ticket_reset, \
     training_option_1, training_option_2, training_option_3, training_options_date, \
     deleted_at, created_at, updated_at";

pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character with full tickets and the starter whistle
    /// balance, marking `today` as its last reset.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCharacter,
        state: &CharacterState,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (owner_id, name, role_id, tickets, whistles, last_ticket_reset)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.role.id())
            .bind(state.tickets)
            .bind(state.whistles)
            .bind(state.last_ticket_reset)
            .fetch_one(pool)
            .await
    }

    /// Find a live character belonging to `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List live characters for an owner, oldest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Lock a live character row for the rest of the transaction.
    ///
    /// Concurrent lifecycle calls for the same character queue up here, so
    /// the check-then-write in the engine cannot interleave.
    pub async fn lock_owned(
        conn: &mut PgConnection,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
             FOR UPDATE"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(conn)
            .await
    }

    /// Replenish tickets if the last reset was before `today`.
    ///
    /// A single conditional UPDATE, so concurrent readers cannot both reset.
    /// Returns the current row either way, or `None` if it does not exist.
    pub async fn reset_tickets_if_needed(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        today: GameDate,
        daily_tickets: i32,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET tickets = $3, last_ticket_reset = $4
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
               AND (last_ticket_reset IS NULL OR last_ticket_reset < $4)
             RETURNING {COLUMNS}"
        );
        let reset = sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(daily_tickets)
            .bind(today)
            .fetch_optional(pool)
            .await?;

        if let Some(character) = reset {
            tracing::info!(character_id = id, %today, "Daily tickets reset");
            return Ok(Some(character));
        }
        Self::find_owned(pool, id, owner_id).await
    }

    /// Write back every field the domain layer may change.
    pub async fn save_state(
        conn: &mut PgConnection,
        state: &CharacterState,
    ) -> Result<Character, sqlx::Error> {
        let (options_date, option_ids) = match &state.todays_options {
            Some(o) => (Some(o.date), o.training_ids.as_slice()),
            None => (None, [].as_slice()),
        };
        let query = format!(
            "UPDATE characters SET
                level = $2, xp = $3, dollars = $4,
                strength = $5, speed = $6, stamina = $7, special_stat = $8,
                whistles = $9, tickets = $10, last_ticket_reset = $11,
                training_option_1 = $12, training_option_2 = $13, training_option_3 = $14,
                training_options_date = $15
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(state.id)
            .bind(state.level)
            .bind(state.experience)
            .bind(state.currency)
            .bind(state.stats.strength)
            .bind(state.stats.speed)
            .bind(state.stats.stamina)
            .bind(state.stats.special)
            .bind(state.whistles)
            .bind(state.tickets)
            .bind(state.last_ticket_reset)
            .bind(option_ids.first().copied())
            .bind(option_ids.get(1).copied())
            .bind(option_ids.get(2).copied())
            .bind(options_date)
            .fetch_one(conn)
            .await
    }

    /// Soft-delete a character. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE characters SET deleted_at = NOW()
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a character and, by cascade, its training log.
    pub async fn hard_delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
