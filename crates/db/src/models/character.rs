//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use striker_core::character::{CharacterState, DailyOptions, TrainingInstance};
use striker_core::error::CoreError;
use striker_core::role::{PlayerRole, RoleId};
use striker_core::stats::Stats;
use striker_core::types::{DbId, GameDate, Timestamp};

/// Longest accepted character name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub role_id: RoleId,
    pub level: i32,
    pub xp: i64,
    pub dollars: i64,
    pub strength: i32,
    pub speed: i32,
    pub stamina: i32,
    pub special_stat: i32,
    pub whistles: i32,
    pub tickets: i32,
    pub last_ticket_reset: Option<GameDate>,
    pub training_option_1: Option<DbId>,
    pub training_option_2: Option<DbId>,
    pub training_option_3: Option<DbId>,
    pub training_options_date: Option<GameDate>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    pub fn role(&self) -> Result<PlayerRole, CoreError> {
        PlayerRole::from_id(self.role_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "Character {} has unknown role_id {}",
                self.id, self.role_id
            ))
        })
    }

    /// Build the domain snapshot, attaching the active training (if any).
    pub fn to_state(&self, active: Option<TrainingInstance>) -> Result<CharacterState, CoreError> {
        let todays_options = self.training_options_date.map(|date| DailyOptions {
            date,
            training_ids: [
                self.training_option_1,
                self.training_option_2,
                self.training_option_3,
            ]
            .into_iter()
            .flatten()
            .collect(),
        });

        Ok(CharacterState {
            id: self.id,
            role: self.role()?,
            level: self.level,
            experience: self.xp,
            currency: self.dollars,
            stats: Stats {
                strength: self.strength,
                speed: self.speed,
                stamina: self.stamina,
                special: self.special_stat,
            },
            tickets: self.tickets,
            whistles: self.whistles,
            last_ticket_reset: self.last_ticket_reset,
            todays_options,
            active_training: active,
        })
    }
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub role: PlayerRole,
}

impl CreateCharacter {
    /// Trim the name and enforce length bounds.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(CoreError::Validation("name must not be empty".into()));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(self)
    }
}
