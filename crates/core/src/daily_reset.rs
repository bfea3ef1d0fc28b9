//! Daily ticket reset policy.
//!
//! Tickets are topped back up to [`DAILY_TICKETS`] at most once per game
//! day. The check is a pure date comparison, so running it on every read is
//! safe and a second call on the same day never touches tickets spent since.

use crate::character::CharacterState;
use crate::types::GameDate;

/// Tickets granted at each daily reset; also the ceiling for whistle conversion.
pub const DAILY_TICKETS: i32 = 10;

/// Whether a character last reset on `last` is due a reset on `today`.
pub fn needs_reset(last: Option<GameDate>, today: GameDate) -> bool {
    match last {
        None => true,
        Some(last) => last < today,
    }
}

/// Apply the daily reset if due. Returns `true` when tickets were replenished.
pub fn ensure_daily_reset(state: &mut CharacterState, today: GameDate) -> bool {
    if !needs_reset(state.last_ticket_reset, today) {
        return false;
    }
    state.tickets = DAILY_TICKETS;
    state.last_ticket_reset = Some(today);
    true
}
