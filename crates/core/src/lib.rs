//! Striker Saga domain core.
//!
//! Pure game rules with zero I/O: the training catalog, daily ticket resets,
//! the daily training menu, the training lifecycle state machine, and the
//! reward/leveling calculator. The `db` and `api` crates persist and expose
//! what this crate decides.

pub mod catalog;
pub mod character;
pub mod clock;
pub mod daily_reset;
pub mod error;
pub mod options;
pub mod rewards;
pub mod role;
pub mod stats;
pub mod training;
pub mod types;
