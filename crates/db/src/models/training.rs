//! Training catalog and training log models.

use serde::Serialize;
use sqlx::FromRow;
use striker_core::catalog::TrainingDefinition;
use striker_core::character::TrainingInstance;
use striker_core::error::CoreError;
use striker_core::role::{PlayerRole, RoleId};
use striker_core::types::{DbId, Timestamp};

/// A row from the `training_list` catalog table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingListEntry {
    pub id: DbId,
    pub name: String,
    pub stat_affected: String,
    pub duration_secs: i32,
    pub mandatory: bool,
    pub eligible_role_id: Option<RoleId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TrainingListEntry> for TrainingDefinition {
    type Error = CoreError;

    fn try_from(row: TrainingListEntry) -> Result<Self, Self::Error> {
        let stat_affected = row.stat_affected.parse().map_err(|_| {
            CoreError::Configuration(format!(
                "Training '{}' has unknown stat '{}'",
                row.name, row.stat_affected
            ))
        })?;
        let eligible_role = match row.eligible_role_id {
            None => None,
            Some(id) => Some(PlayerRole::from_id(id).ok_or_else(|| {
                CoreError::Configuration(format!(
                    "Training '{}' has unknown role_id {id}",
                    row.name
                ))
            })?),
        };
        Ok(TrainingDefinition {
            id: row.id,
            name: row.name,
            stat_affected,
            duration_secs: row.duration_secs,
            mandatory: row.mandatory,
            eligible_role,
        })
    }
}

/// A row from the `training_logs` table.
///
/// `xp_gained IS NULL` marks the character's active training; archived rows
/// carry the rewards that were granted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingLog {
    pub id: DbId,
    pub character_id: DbId,
    pub training_list_id: DbId,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub xp_gained: Option<i64>,
    pub dollars_gained: Option<i64>,
    pub stats_gained: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TrainingLog {
    pub fn is_active(&self) -> bool {
        self.xp_gained.is_none()
    }

    pub fn to_instance(&self) -> TrainingInstance {
        TrainingInstance {
            log_id: Some(self.id),
            training_id: self.training_list_id,
            started_at: self.started_at,
            finished_at: self.finished_at,
            rewards_granted: !self.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use striker_core::stats::StatKind;

    use super::*;

    fn entry(stat: &str, mandatory: bool, role: Option<RoleId>) -> TrainingListEntry {
        let now = Utc::now();
        TrainingListEntry {
            id: 1,
            name: "Shooting".into(),
            stat_affected: stat.into(),
            duration_secs: 60,
            mandatory,
            eligible_role_id: role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn entry_converts_to_definition() {
        let def = TrainingDefinition::try_from(entry("special", true, Some(4))).unwrap();
        assert_eq!(def.stat_affected, StatKind::Special);
        assert_eq!(def.eligible_role, Some(PlayerRole::Attacker));
        assert!(def.mandatory);
    }

    #[test]
    fn unknown_stat_is_configuration_error() {
        let err = TrainingDefinition::try_from(entry("charisma", false, None)).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn unknown_role_is_configuration_error() {
        let err = TrainingDefinition::try_from(entry("special", true, Some(9))).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn active_log_maps_to_pending_instance() {
        let now = Utc::now();
        let log = TrainingLog {
            id: 10,
            character_id: 2,
            training_list_id: 5,
            started_at: now,
            finished_at: now + chrono::Duration::seconds(30),
            xp_gained: None,
            dollars_gained: None,
            stats_gained: None,
            created_at: now,
            updated_at: now,
        };
        let inst = log.to_instance();
        assert_eq!(inst.log_id, Some(10));
        assert_eq!(inst.training_id, 5);
        assert!(!inst.rewards_granted);
    }
}
