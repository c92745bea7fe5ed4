use chrono::Utc;
use tracing::info;

use crate::database::{
    db::DbClient,
    db_structs::{Match, NewMatch}
};

pub mod chronology;
pub mod constants;
pub mod elo;
pub mod error;
pub mod replay;
pub mod seasons;
pub mod tracker;

use error::ProcessorError;

/// Runs the season transition: expires active seasons whose window has
/// closed, then activates the season covering today if it is not active
/// yet. Newly activating a season resets every player's current-cycle
/// counters as part of the same transaction. Safe to run on any cadence;
/// a repeat run with nothing to do changes nothing.
///
/// A season table in which zero or multiple windows cover today is
/// surfaced as [`ProcessorError::ConfigurationInconsistency`]. Any
/// expirations have been applied by that point, but no season is activated
/// and no counters are reset.
pub async fn run_season_transition(client: &DbClient) -> Result<(), ProcessorError> {
    let seasons = client.get_seasons().await?;
    let today = Utc::now().date_naive();

    let expired = seasons::expirations(&seasons, today);
    if !expired.is_empty() {
        client.expire_seasons(&expired).await?;
    }

    match seasons::activation(&seasons, today)? {
        Some(season_id) => client.activate_season(season_id).await?,
        None => info!("No season transition needed for {}", today)
    }

    Ok(())
}

/// Rebuilds the rating history table from the match log. See
/// [`replay::rating_history`] for the scan itself; the delete-and-insert
/// happens in one transaction, so a failed run leaves the existing rows
/// in place.
pub async fn replay_rating_history(client: &DbClient) -> Result<(), ProcessorError> {
    let matches = client.get_matches().await?;
    let entries = replay::rating_history(&matches)?;

    client.replace_rating_history(&entries).await
}

/// Rebuilds the season snapshot table from the match log. Same contract
/// as [`replay_rating_history`]: all-or-nothing, idempotent.
pub async fn replay_season_snapshots(client: &DbClient) -> Result<(), ProcessorError> {
    let matches = client.get_matches().await?;
    let snapshots = replay::season_snapshots(&matches)?;

    client.replace_season_snapshots(&snapshots).await
}

/// Records one decided match through the live path: log append, player
/// counter settle and history entries in a single transaction.
pub async fn record_match(client: &DbClient, new_match: &NewMatch) -> Result<Match, ProcessorError> {
    client.record_match(new_match).await
}
