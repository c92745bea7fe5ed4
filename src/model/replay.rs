use indexmap::IndexMap;

use crate::{
    database::db_structs::{Match, RatingHistoryEntry, SeasonSnapshot},
    model::{chronology, error::ProcessorError, tracker::SeasonLedger},
    utils::progress_utils::progress_bar
};

/// Recomputes every rating history entry from the match log alone.
///
/// The log is scanned once in `(date, id)` order with a fresh
/// [`SeasonLedger`], so every season boundary a player crosses resets their
/// tracked rating exactly as activation reset it at the time. Two entries
/// come out per match, winner first. The result is fully determined by the
/// log: replaying an unchanged log always yields the same entries.
pub fn rating_history(matches: &[Match]) -> Result<Vec<RatingHistoryEntry>, ProcessorError> {
    let mut ordered = matches.to_vec();
    chronology::sort_chronologically(&mut ordered)?;

    let bar = progress_bar(ordered.len() as u64, "Replaying rating history".to_string());
    let mut ledger = SeasonLedger::new();
    let mut entries = Vec::with_capacity(ordered.len() * 2);

    for m in &ordered {
        let (winner, loser) = ledger.apply(m);

        entries.push(RatingHistoryEntry {
            match_id: m.id,
            player_id: m.winner_id,
            rating: winner.rating
        });
        entries.push(RatingHistoryEntry {
            match_id: m.id,
            player_id: m.loser_id,
            rating: loser.rating
        });

        bar.inc(1);
    }

    bar.finish();
    Ok(entries)
}

/// Recomputes one snapshot per `(season, player)` pair from the match log
/// alone: the pair's tracked state right after the last match that player
/// played in that season. Pairs with no matches produce no snapshot.
pub fn season_snapshots(matches: &[Match]) -> Result<Vec<SeasonSnapshot>, ProcessorError> {
    let mut ordered = matches.to_vec();
    chronology::sort_chronologically(&mut ordered)?;

    let bar = progress_bar(ordered.len() as u64, "Replaying season snapshots".to_string());
    let mut ledger = SeasonLedger::new();

    // Keyed by (season, player); later matches overwrite earlier states so
    // the surviving value is the last one observed within the season.
    // IndexMap keeps the output in first-appearance order.
    let mut snapshots: IndexMap<(i32, i32), SeasonSnapshot> = IndexMap::new();

    for m in &ordered {
        let (winner, loser) = ledger.apply(m);

        snapshots.insert(
            (m.season_id, m.winner_id),
            SeasonSnapshot {
                season_id: m.season_id,
                player_id: m.winner_id,
                rating: winner.rating,
                win_count: winner.win_count,
                loss_count: winner.loss_count
            }
        );
        snapshots.insert(
            (m.season_id, m.loser_id),
            SeasonSnapshot {
                season_id: m.season_id,
                player_id: m.loser_id,
                rating: loser.rating,
                win_count: loser.win_count,
                loss_count: loser.loss_count
            }
        );

        bar.inc(1);
    }

    bar.finish();
    Ok(snapshots.into_values().collect())
}
