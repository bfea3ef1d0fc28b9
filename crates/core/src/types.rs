/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar day used for ticket resets and the daily training menu.
pub type GameDate = chrono::NaiveDate;

/// The game day a timestamp falls on. Days roll over at UTC midnight.
pub fn game_date(ts: Timestamp) -> GameDate {
    ts.date_naive()
}
