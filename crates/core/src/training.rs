//! Training lifecycle state machine.
//!
//! ```text
//!            start                 now >= finished_at
//!   Idle ───────────────▶ InProgress ─────────────────▶ ReadyToClaim
//!    ▲                      │   (derived, never stored)      │
//!    │        cancel        │                                │ finish
//!    └──────────────────────┴────────────────────────────────┘
//! ```
//!
//! `ReadyToClaim` is computed from the clock at read time; nothing advances
//! state in the background. Every operation validates all preconditions
//! before touching the [`CharacterState`], so a failed call leaves it as it
//! was.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{TrainingCatalog, TrainingDefinition};
use crate::character::{CharacterState, TrainingInstance};
use crate::daily_reset::DAILY_TICKETS;
use crate::error::{CoreError, TrainingError};
use crate::options::regenerate_menu;
use crate::rewards::{apply_experience, compute_rewards, Rewards};
use crate::types::{game_date, Timestamp};

/// Upper bound for whistle conversion.
pub const MAX_TICKETS: i32 = DAILY_TICKETS;

/// Whether a cancel refund may push tickets above [`MAX_TICKETS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundPolicy {
    /// Always refund exactly one ticket.
    #[default]
    Uncapped,
    /// Refund one ticket but never exceed the daily maximum.
    Capped,
}

impl RefundPolicy {
    pub fn refund(self, tickets: i32) -> i32 {
        match self {
            RefundPolicy::Uncapped => tickets.saturating_add(1),
            RefundPolicy::Capped => tickets.saturating_add(1).min(MAX_TICKETS).max(tickets),
        }
    }
}

impl fmt::Display for RefundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefundPolicy::Uncapped => "uncapped",
            RefundPolicy::Capped => "capped",
        })
    }
}

impl FromStr for RefundPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uncapped" => Ok(RefundPolicy::Uncapped),
            "capped" => Ok(RefundPolicy::Capped),
            other => Err(CoreError::Validation(format!(
                "Invalid refund policy '{other}'. Must be one of: uncapped, capped"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Idle,
    InProgress,
    ReadyToClaim,
}

pub fn status(state: &CharacterState, now: Timestamp) -> TrainingStatus {
    match state.pending_training() {
        None => TrainingStatus::Idle,
        Some(t) if t.is_ready(now) => TrainingStatus::ReadyToClaim,
        Some(_) => TrainingStatus::InProgress,
    }
}

/// Read-only view of the active training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveTraining {
    pub active: bool,
    pub status: TrainingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ms: Option<i64>,
}

pub fn get_active(state: &CharacterState, now: Timestamp) -> ActiveTraining {
    match state.pending_training() {
        None => ActiveTraining {
            active: false,
            status: TrainingStatus::Idle,
            training: None,
            remaining_ms: None,
        },
        Some(t) => ActiveTraining {
            active: true,
            status: status(state, now),
            training: Some(t.clone()),
            remaining_ms: Some(t.remaining_ms(now)),
        },
    }
}

/// Begin `training_id`, spending one ticket.
///
/// The id is resolved first, then the single-slot and ticket checks run.
pub fn start(
    state: &mut CharacterState,
    catalog: &TrainingCatalog,
    training_id: i64,
    now: Timestamp,
) -> Result<TrainingInstance, TrainingError> {
    let def = catalog.resolve(training_id)?;
    if state.pending_training().is_some() {
        return Err(TrainingError::AlreadyTraining);
    }
    if state.tickets <= 0 {
        return Err(TrainingError::NoTickets);
    }

    let instance = TrainingInstance::begin(def, now);
    state.tickets -= 1;
    state.active_training = Some(instance.clone());
    Ok(instance)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    pub canceled: bool,
    /// Ticket balance after the refund; `None` when nothing was canceled.
    pub tickets: Option<i32>,
    /// The instance that was removed.
    pub removed: Option<TrainingInstance>,
    /// The training had already finished, so its rewards were given up.
    pub forfeited_rewards: bool,
}

/// Drop the active training and refund one ticket.
///
/// Allowed at any point before rewards are claimed, including after
/// `finished_at`; in that case the rewards are forfeited. Canceling with
/// nothing active is not an error.
pub fn cancel(state: &mut CharacterState, now: Timestamp, policy: RefundPolicy) -> CancelOutcome {
    let Some(instance) = state.pending_training().cloned() else {
        return CancelOutcome {
            canceled: false,
            tickets: None,
            removed: None,
            forfeited_rewards: false,
        };
    };

    state.active_training = None;
    state.tickets = policy.refund(state.tickets);
    CancelOutcome {
        canceled: true,
        tickets: Some(state.tickets),
        forfeited_rewards: instance.is_ready(now),
        removed: Some(instance),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishOutcome {
    pub rewards: Rewards,
    pub levels_gained: i32,
    /// The archived instance (`rewards_granted == true`).
    pub archived: TrainingInstance,
    pub training: TrainingDefinition,
    /// The fresh menu drawn right after finishing.
    pub next_options: Vec<TrainingDefinition>,
}

/// Claim a finished training: grant rewards, level up, archive the
/// instance, and draw a fresh menu for the day.
///
/// Once archived the instance is gone, so a second call fails with
/// [`TrainingError::NoActiveTraining`] and grants nothing.
pub fn finish<R: Rng + ?Sized>(
    state: &mut CharacterState,
    catalog: &TrainingCatalog,
    now: Timestamp,
    rng: &mut R,
) -> Result<FinishOutcome, CoreError> {
    let instance = state
        .pending_training()
        .cloned()
        .ok_or(TrainingError::NoActiveTraining)?;
    if !instance.is_ready(now) {
        return Err(TrainingError::TrainingNotFinished {
            remaining_ms: instance.remaining_ms(now),
        }
        .into());
    }
    let training = catalog.resolve(instance.training_id)?.clone();

    // Draw on a scratch copy so a configuration failure leaves `state` intact.
    let mut next = state.clone();
    let next_options = regenerate_menu(&mut next, catalog, game_date(now), rng)?;

    let rewards = compute_rewards(next.level, &training, rng);
    let progress = apply_experience(next.level, next.experience, rewards.xp);
    next.level = progress.level;
    next.experience = progress.experience;
    next.currency = next.currency.saturating_add(rewards.currency);
    next.stats.add(rewards.stat.name, rewards.stat.value);
    next.active_training = None;

    *state = next;
    Ok(FinishOutcome {
        rewards,
        levels_gained: progress.levels_gained,
        archived: TrainingInstance {
            rewards_granted: true,
            ..instance
        },
        training,
        next_options,
    })
}

/// Spend one whistle for one ticket, up to [`MAX_TICKETS`].
pub fn convert_whistle_to_ticket(state: &mut CharacterState) -> Result<(), TrainingError> {
    if state.tickets >= MAX_TICKETS {
        return Err(TrainingError::MaxTickets);
    }
    if state.whistles <= 0 {
        return Err(TrainingError::NoWhistles);
    }
    state.tickets += 1;
    state.whistles -= 1;
    Ok(())
}
