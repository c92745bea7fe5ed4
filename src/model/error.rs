use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The season table does not single out one season for today's window.
    /// This is collaborator data gone wrong and is never auto-resolved.
    #[error("Season configuration inconsistency: {0}")]
    ConfigurationInconsistency(String),

    /// Two match rows share the full `(date, id)` ordering key. The write
    /// path is supposed to make this impossible, so replays refuse to pick
    /// an order themselves.
    #[error("Ambiguous match ordering: duplicate key (date {date}, id {match_id})")]
    OrderingAmbiguity { date: NaiveDate, match_id: i32 },

    #[error("Match references unknown player {0}")]
    UnknownPlayer(i32),

    #[error("Match references unknown season {0}")]
    UnknownSeason(i32),

    #[error("Invalid match: {0}")]
    InvalidMatch(String),

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error)
}
