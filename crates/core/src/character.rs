//! In-memory snapshot of the mutable parts of a character record.
//!
//! The lifecycle engine, option selector and daily reset policy all operate
//! on a [`CharacterState`]. The API layer loads one under a row lock, applies
//! the domain operation, and writes the result back in the same transaction.

use serde::{Deserialize, Serialize};

use crate::catalog::TrainingDefinition;
use crate::daily_reset::DAILY_TICKETS;
use crate::role::PlayerRole;
use crate::stats::Stats;
use crate::types::{DbId, GameDate, Timestamp};

/// A single timed training run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingInstance {
    /// Row id in `training_logs`; `None` until persisted.
    pub log_id: Option<DbId>,
    pub training_id: DbId,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub rewards_granted: bool,
}

impl TrainingInstance {
    pub fn begin(def: &TrainingDefinition, now: Timestamp) -> Self {
        Self {
            log_id: None,
            training_id: def.id,
            started_at: now,
            finished_at: now + def.duration(),
            rewards_granted: false,
        }
    }

    /// Milliseconds until the training can be claimed, never negative.
    pub fn remaining_ms(&self, now: Timestamp) -> i64 {
        (self.finished_at - now).num_milliseconds().max(0)
    }

    pub fn is_ready(&self, now: Timestamp) -> bool {
        now >= self.finished_at
    }
}

/// The menu of trainings offered on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOptions {
    pub date: GameDate,
    pub training_ids: Vec<DbId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pub id: DbId,
    pub role: PlayerRole,
    pub level: i32,
    /// Progress toward the next level; always below the level threshold.
    pub experience: i64,
    pub currency: i64,
    pub stats: Stats,
    pub tickets: i32,
    pub whistles: i32,
    pub last_ticket_reset: Option<GameDate>,
    pub todays_options: Option<DailyOptions>,
    pub active_training: Option<TrainingInstance>,
}

impl CharacterState {
    /// A freshly created character: level 1, nothing earned, full tickets.
    pub fn new(id: DbId, role: PlayerRole, starter_whistles: i32, today: GameDate) -> Self {
        Self {
            id,
            role,
            level: 1,
            experience: 0,
            currency: 0,
            stats: Stats::default(),
            tickets: DAILY_TICKETS,
            whistles: starter_whistles,
            last_ticket_reset: Some(today),
            todays_options: None,
            active_training: None,
        }
    }

    /// The non-archived training, if any.
    pub fn pending_training(&self) -> Option<&TrainingInstance> {
        self.active_training.as_ref().filter(|t| !t.rewards_granted)
    }
}
