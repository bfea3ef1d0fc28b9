//! Player roles.
//!
//! Discriminants match the seed data in `20261016000002_create_player_roles_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role ID type matching SMALLINT in the `player_roles` lookup table.
pub type RoleId = i16;

#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Goalkeeper = 1,
    Defender = 2,
    Midfielder = 3,
    Attacker = 4,
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 4] = [
        PlayerRole::Goalkeeper,
        PlayerRole::Defender,
        PlayerRole::Midfielder,
        PlayerRole::Attacker,
    ];

    /// Return the database role ID.
    pub fn id(self) -> RoleId {
        self as RoleId
    }

    pub fn from_id(id: RoleId) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerRole::Goalkeeper => "goalkeeper",
            PlayerRole::Defender => "defender",
            PlayerRole::Midfielder => "midfielder",
            PlayerRole::Attacker => "attacker",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == needle)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{s}'. Must be one of: goalkeeper, defender, midfielder, attacker"
                ))
            })
    }
}
