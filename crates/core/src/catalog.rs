//! Training catalog: the read-only list of trainable activities.
//!
//! Loaded from the `training_list` table at request time and validated on
//! construction so downstream code can trust every entry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, TrainingError};
use crate::role::PlayerRole;
use crate::stats::StatKind;
use crate::types::DbId;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDefinition {
    pub id: DbId,
    pub name: String,
    pub stat_affected: StatKind,
    pub duration_secs: i32,
    /// `true` marks the role-specific special training.
    pub mandatory: bool,
    /// Only set for mandatory entries.
    pub eligible_role: Option<PlayerRole>,
}

impl TrainingDefinition {
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.duration_secs))
    }

    /// Whether this is the special training offered to `role`.
    pub fn is_special_for(&self, role: PlayerRole) -> bool {
        self.mandatory && self.eligible_role == Some(role)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrainingCatalog {
    entries: Vec<TrainingDefinition>,
}

impl TrainingCatalog {
    /// Build a catalog, rejecting entries that would break the engine:
    /// non-positive durations, mandatory entries without a role, and
    /// duplicate IDs.
    pub fn new(entries: Vec<TrainingDefinition>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for def in &entries {
            if def.duration_secs <= 0 {
                return Err(CoreError::Configuration(format!(
                    "Training '{}' (id {}) has non-positive duration {}",
                    def.name, def.id, def.duration_secs
                )));
            }
            if def.mandatory && def.eligible_role.is_none() {
                return Err(CoreError::Configuration(format!(
                    "Mandatory training '{}' (id {}) has no eligible role",
                    def.name, def.id
                )));
            }
            if !seen.insert(def.id) {
                return Err(CoreError::Configuration(format!(
                    "Duplicate training id {}",
                    def.id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TrainingDefinition] {
        &self.entries
    }

    pub fn get(&self, id: DbId) -> Option<&TrainingDefinition> {
        self.entries.iter().find(|d| d.id == id)
    }

    pub fn resolve(&self, id: DbId) -> Result<&TrainingDefinition, TrainingError> {
        self.get(id).ok_or(TrainingError::UnknownTraining { id })
    }

    /// Special trainings eligible for `role`.
    pub fn mandatory_for(&self, role: PlayerRole) -> Vec<&TrainingDefinition> {
        self.entries.iter().filter(|d| d.is_special_for(role)).collect()
    }

    /// Trainings any role may be offered.
    pub fn general_pool(&self) -> Vec<&TrainingDefinition> {
        self.entries.iter().filter(|d| !d.mandatory).collect()
    }

    /// Roles that could not be given a menu: no special training is eligible.
    pub fn roles_without_special(&self) -> Vec<PlayerRole> {
        PlayerRole::ALL
            .into_iter()
            .filter(|role| self.mandatory_for(*role).is_empty())
            .collect()
    }
}
