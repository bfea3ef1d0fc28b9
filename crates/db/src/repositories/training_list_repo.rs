//! Repository for the `training_list` catalog table.

use sqlx::PgPool;
use striker_core::types::DbId;

use crate::models::training::TrainingListEntry;

const COLUMNS: &str =
    "id, name, stat_affected, duration_secs, mandatory, eligible_role_id, created_at, updated_at";

pub struct TrainingListRepo;

impl TrainingListRepo {
    /// The whole catalog, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<TrainingListEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_list ORDER BY id ASC");
        sqlx::query_as::<_, TrainingListEntry>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingListEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_list WHERE id = $1");
        sqlx::query_as::<_, TrainingListEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
