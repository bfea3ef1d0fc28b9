//! Repository for the `training_logs` table.
//!
//! The row with `xp_gained IS NULL` is the character's active training.
//! Finishing fills in the reward columns (archiving it); canceling deletes it.

use sqlx::{PgConnection, PgPool};
use striker_core::character::TrainingInstance;
use striker_core::rewards::Rewards;
use striker_core::types::DbId;

use crate::models::training::TrainingLog;

const COLUMNS: &str = "id, character_id, training_list_id, started_at, finished_at, \
     xp_gained, dollars_gained, stats_gained, created_at, updated_at";

pub struct TrainingLogRepo;

impl TrainingLogRepo {
    /// The active (unarchived) training for a character, if any.
    pub async fn find_active(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<Option<TrainingLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_logs
             WHERE character_id = $1 AND xp_gained IS NULL"
        );
        sqlx::query_as::<_, TrainingLog>(&query)
            .bind(character_id)
            .fetch_optional(conn)
            .await
    }

    /// Record a newly started training.
    ///
    /// The `uq_training_logs_active` index rejects a second active row.
    pub async fn insert_active(
        conn: &mut PgConnection,
        character_id: DbId,
        instance: &TrainingInstance,
    ) -> Result<TrainingLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_logs (character_id, training_list_id, started_at, finished_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingLog>(&query)
            .bind(character_id)
            .bind(instance.training_id)
            .bind(instance.started_at)
            .bind(instance.finished_at)
            .fetch_one(conn)
            .await
    }

    /// Archive an active row with the rewards it granted.
    ///
    /// Returns `None` if the row was already archived or removed.
    pub async fn archive(
        conn: &mut PgConnection,
        log_id: DbId,
        rewards: &Rewards,
    ) -> Result<Option<TrainingLog>, sqlx::Error> {
        let query = format!(
            "UPDATE training_logs
             SET xp_gained = $2, dollars_gained = $3, stats_gained = $4
             WHERE id = $1 AND xp_gained IS NULL
             RETURNING {COLUMNS}"
        );
        let stats = serde_json::json!({
            "stat": rewards.stat.name,
            "value": rewards.stat.value,
        });
        sqlx::query_as::<_, TrainingLog>(&query)
            .bind(log_id)
            .bind(rewards.xp)
            .bind(rewards.currency)
            .bind(stats)
            .fetch_optional(conn)
            .await
    }

    /// Remove an active row. Returns `true` if a row was deleted.
    pub async fn delete_active(conn: &mut PgConnection, log_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM training_logs WHERE id = $1 AND xp_gained IS NULL")
            .bind(log_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Archived runs for a character, newest first.
    pub async fn list_archived(
        pool: &PgPool,
        character_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrainingLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_logs
             WHERE character_id = $1 AND xp_gained IS NOT NULL
             ORDER BY finished_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TrainingLog>(&query)
            .bind(character_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
