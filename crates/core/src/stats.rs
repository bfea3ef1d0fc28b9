//! Trainable character stats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The stat a training improves. `Special` is the role-specific stat
/// (saving, tackling, vision or shooting depending on the role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Strength,
    Speed,
    Stamina,
    Special,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Strength,
        StatKind::Speed,
        StatKind::Stamina,
        StatKind::Special,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Strength => "strength",
            StatKind::Speed => "speed",
            StatKind::Stamina => "stamina",
            StatKind::Special => "special",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown stat '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub speed: i32,
    pub stamina: i32,
    pub special: i32,
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Speed => self.speed,
            StatKind::Stamina => self.stamina,
            StatKind::Special => self.special,
        }
    }

    pub fn add(&mut self, kind: StatKind, amount: i32) {
        let slot = match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Speed => &mut self.speed,
            StatKind::Stamina => &mut self.stamina,
            StatKind::Special => &mut self.special,
        };
        *slot = slot.saturating_add(amount);
    }
}
