//! Reward and leveling calculator.
//!
//! These formulas are the game's balancing curve:
//!
//! | Quantity           | Formula                                       |
//! |--------------------|-----------------------------------------------|
//! | xp for level `L`   | `50 * L^2 + 100 * L`                          |
//! | quests per level   | `1.5 * sqrt(L)`, rounded to one decimal       |
//! | base xp per quest  | `round(xp_needed / quests_per_level)`         |
//! | base currency      | `50 + 5 * (L - 1)`                            |
//! | stat gain          | `L`                                           |
//!
//! Granted xp and currency carry independent +/-10% noise, so only the
//! `*_with_factors` variants are deterministic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::TrainingDefinition;
use crate::stats::StatKind;

/// Half-width of the uniform noise applied to xp and currency.
pub const REWARD_NOISE: f64 = 0.10;

/// Experience required to advance from `level` to `level + 1`.
pub fn xp_needed_for_level(level: i32) -> i64 {
    let l = i64::from(level);
    50 * l * l + 100 * l
}

pub fn quests_per_level(level: i32) -> f64 {
    let raw = 1.5 * f64::from(level).sqrt();
    (raw * 10.0).round() / 10.0
}

pub fn base_xp_per_quest(level: i32) -> i64 {
    (xp_needed_for_level(level) as f64 / quests_per_level(level)).round() as i64
}

pub fn base_currency(level: i32) -> i64 {
    50 + 5 * (i64::from(level) - 1)
}

/// Draw a noise factor uniformly from `[1 - REWARD_NOISE, 1 + REWARD_NOISE]`.
pub fn sample_factor<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range((1.0 - REWARD_NOISE)..=(1.0 + REWARD_NOISE))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGain {
    pub name: StatKind,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: i64,
    pub currency: i64,
    pub stat: StatGain,
}

pub fn compute_rewards_with_factors(
    level: i32,
    stat: StatKind,
    xp_factor: f64,
    currency_factor: f64,
) -> Rewards {
    let xp = ((base_xp_per_quest(level) as f64) * xp_factor).round() as i64;
    let currency = ((base_currency(level) as f64) * currency_factor).round() as i64;
    Rewards {
        xp: xp.max(1),
        currency: currency.max(1),
        stat: StatGain {
            name: stat,
            value: level,
        },
    }
}

/// Rewards for finishing `training` at `level`, with fresh noise.
pub fn compute_rewards<R: Rng + ?Sized>(
    level: i32,
    training: &TrainingDefinition,
    rng: &mut R,
) -> Rewards {
    let xp_factor = sample_factor(rng);
    let currency_factor = sample_factor(rng);
    compute_rewards_with_factors(level, training.stat_affected, xp_factor, currency_factor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: i32,
    pub experience: i64,
    pub levels_gained: i32,
}

/// Add `gained` xp and roll over as many levels as it pays for.
///
/// The threshold grows with every level and is never below 150, so the loop
/// always terminates.
pub fn apply_experience(level: i32, experience: i64, gained: i64) -> LevelProgress {
    let mut level = level.max(1);
    let mut experience = experience.saturating_add(gained.max(0));
    let mut levels_gained = 0;

    while experience >= xp_needed_for_level(level) {
        experience -= xp_needed_for_level(level);
        level += 1;
        levels_gained += 1;
    }

    LevelProgress {
        level,
        experience,
        levels_gained,
    }
}
