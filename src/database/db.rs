use std::sync::Arc;

use itertools::Itertools;
use postgres_types::ToSql;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{error, info};

use super::db_structs::{Match, NewMatch, Player, RatingHistoryEntry, Season, SeasonSnapshot};
use crate::{
    model::{constants::DEFAULT_RATING, error::ProcessorError, tracker},
    utils::progress_utils::progress_bar
};

#[derive(Clone)]
pub struct DbClient {
    client: Arc<Client>
}

impl DbClient {
    // Connect to the database and return a DbClient instance
    pub async fn connect(connection_str: &str) -> Result<Self, ProcessorError> {
        let (client, connection) = tokio_postgres::connect(connection_str, NoTls).await?;

        // Spawn the connection object to run in the background
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(DbClient {
            client: Arc::new(client)
        })
    }

    /// Loads the entire match log in replay order.
    pub async fn get_matches(&self) -> Result<Vec<Match>, ProcessorError> {
        info!("Fetching matches...");
        let rows = self
            .client
            .query(
                "SELECT id, season_id, winner_id, loser_id, date, shutout \
                 FROM matches ORDER BY date, id",
                &[]
            )
            .await?;

        let matches = rows.iter().map(Self::match_from_row).collect_vec();

        info!("Fetched {} matches", matches.len());
        Ok(matches)
    }

    pub async fn get_seasons(&self) -> Result<Vec<Season>, ProcessorError> {
        let rows = self
            .client
            .query(
                "SELECT id, start_date, end_date, active FROM seasons ORDER BY start_date, id",
                &[]
            )
            .await?;

        Ok(rows.iter().map(Self::season_from_row).collect_vec())
    }

    async fn get_player(&self, player_id: i32) -> Result<Option<Player>, ProcessorError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, name, rating, win_count, loss_count, bonus_given_count, bonus_taken_count \
                 FROM players WHERE id = $1",
                &[&player_id]
            )
            .await?;

        Ok(row.as_ref().map(Self::player_from_row))
    }

    /// Marks the given seasons inactive. One statement, atomic on its own.
    pub async fn expire_seasons(&self, season_ids: &[i32]) -> Result<(), ProcessorError> {
        let id_list = season_ids.iter().join(",");

        self.client
            .execute(
                format!("UPDATE seasons SET active = FALSE WHERE id = ANY(ARRAY[{}])", id_list).as_str(),
                &[]
            )
            .await?;

        info!("Expired seasons [{}]", id_list);
        Ok(())
    }

    /// Activates `season_id` and resets every player's current-cycle
    /// counters to their defaults. The two writes land together or not at
    /// all; the reset rides on the season becoming newly active.
    pub async fn activate_season(&self, season_id: i32) -> Result<(), ProcessorError> {
        let statements = format!(
            "UPDATE seasons SET active = FALSE WHERE active = TRUE;\n\
             UPDATE seasons SET active = TRUE WHERE id = {};\n\
             UPDATE players SET rating = {}, win_count = 0, loss_count = 0, \
             bonus_given_count = 0, bonus_taken_count = 0;",
            season_id, DEFAULT_RATING
        );

        self.execute_atomic(&statements).await?;

        info!("Activated season {} and reset player counters", season_id);
        Ok(())
    }

    /// Replaces the rating history table with `entries`. Delete and
    /// regenerate run in one transaction so a failure partway leaves the
    /// previous rows untouched.
    pub async fn replace_rating_history(&self, entries: &[RatingHistoryEntry]) -> Result<(), ProcessorError> {
        let mut statements = vec!["DELETE FROM rating_history;".to_string()];

        if !entries.is_empty() {
            let bar = progress_bar(entries.len() as u64, "Building rating history rows".to_string());
            let values = entries
                .iter()
                .map(|e| {
                    bar.inc(1);
                    format!("({}, {}, {})", e.match_id, e.player_id, e.rating)
                })
                .join(", ");
            bar.finish();

            statements.push(format!(
                "INSERT INTO rating_history (match_id, player_id, rating) VALUES {};",
                values
            ));
        }

        self.execute_atomic(&statements.join("\n")).await?;

        info!("Rating history replaced: {} entries", entries.len());
        Ok(())
    }

    /// Replaces the season snapshot table with `snapshots`, atomically.
    pub async fn replace_season_snapshots(&self, snapshots: &[SeasonSnapshot]) -> Result<(), ProcessorError> {
        let mut statements = vec!["DELETE FROM season_snapshots;".to_string()];

        if !snapshots.is_empty() {
            let bar = progress_bar(snapshots.len() as u64, "Building season snapshot rows".to_string());
            let values = snapshots
                .iter()
                .map(|s| {
                    bar.inc(1);
                    format!(
                        "({}, {}, {}, {}, {})",
                        s.season_id, s.player_id, s.rating, s.win_count, s.loss_count
                    )
                })
                .join(", ");
            bar.finish();

            statements.push(format!(
                "INSERT INTO season_snapshots (season_id, player_id, rating, win_count, loss_count) \
                 VALUES {};",
                values
            ));
        }

        self.execute_atomic(&statements.join("\n")).await?;

        info!("Season snapshots replaced: {} rows", snapshots.len());
        Ok(())
    }

    /// Records a decided match: appends the log row, settles both players'
    /// counters and appends their two rating history entries, all in one
    /// transaction. This is the live counterpart of the history replay;
    /// both settle through [`tracker::settle`].
    pub async fn record_match(&self, new_match: &NewMatch) -> Result<Match, ProcessorError> {
        if new_match.winner_id == new_match.loser_id {
            return Err(ProcessorError::InvalidMatch(format!(
                "winner and loser are both player {}",
                new_match.winner_id
            )));
        }

        self.client.batch_execute("BEGIN").await?;

        match self.record_match_in_tx(new_match).await {
            Ok(recorded) => {
                self.client.batch_execute("COMMIT").await?;
                info!(
                    "Recorded match {}: player {} over player {}",
                    recorded.id, recorded.winner_id, recorded.loser_id
                );
                Ok(recorded)
            }
            Err(e) => {
                let _ = self.client.batch_execute("ROLLBACK").await;
                Err(e)
            }
        }
    }

    async fn record_match_in_tx(&self, new_match: &NewMatch) -> Result<Match, ProcessorError> {
        let season = self
            .client
            .query_opt("SELECT id FROM seasons WHERE id = $1", &[&new_match.season_id])
            .await?;
        if season.is_none() {
            return Err(ProcessorError::UnknownSeason(new_match.season_id));
        }

        let mut winner = self
            .get_player(new_match.winner_id)
            .await?
            .ok_or(ProcessorError::UnknownPlayer(new_match.winner_id))?;
        let mut loser = self
            .get_player(new_match.loser_id)
            .await?
            .ok_or(ProcessorError::UnknownPlayer(new_match.loser_id))?;

        let insert_values: &[&(dyn ToSql + Sync)] = &[
            &new_match.season_id,
            &new_match.winner_id,
            &new_match.loser_id,
            &new_match.date,
            &new_match.shutout
        ];
        let row = self
            .client
            .query_one(
                "INSERT INTO matches (season_id, winner_id, loser_id, date, shutout) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
                insert_values
            )
            .await?;
        let match_id: i32 = row.get("id");

        let (winner_state, loser_state) =
            tracker::settle(winner.cycle_state(), loser.cycle_state(), new_match.shutout);
        winner.apply_cycle_state(winner_state);
        loser.apply_cycle_state(loser_state);

        self.update_player_counters(&winner).await?;
        self.update_player_counters(&loser).await?;

        self.client
            .execute(
                "INSERT INTO rating_history (match_id, player_id, rating) \
                 VALUES ($1, $2, $3), ($1, $4, $5)",
                &[&match_id, &winner.id, &winner.rating, &loser.id, &loser.rating]
            )
            .await?;

        Ok(Match {
            id: match_id,
            season_id: new_match.season_id,
            winner_id: new_match.winner_id,
            loser_id: new_match.loser_id,
            date: new_match.date,
            shutout: new_match.shutout
        })
    }

    async fn update_player_counters(&self, player: &Player) -> Result<(), ProcessorError> {
        let query = "UPDATE players SET rating = $1, win_count = $2, loss_count = $3, \
             bonus_given_count = $4, bonus_taken_count = $5 WHERE id = $6";
        let values: &[&(dyn ToSql + Sync)] = &[
            &player.rating,
            &player.win_count,
            &player.loss_count,
            &player.bonus_given_count,
            &player.bonus_taken_count,
            &player.id
        ];

        self.client.execute(query, values).await?;

        Ok(())
    }

    /// Runs `statements` inside one transaction, rolling back on failure.
    async fn execute_atomic(&self, statements: &str) -> Result<(), ProcessorError> {
        let sql = format!("BEGIN;\n{}\nCOMMIT;", statements);

        if let Err(e) = self.client.batch_execute(&sql).await {
            let _ = self.client.batch_execute("ROLLBACK").await;
            return Err(e.into());
        }

        Ok(())
    }

    fn match_from_row(row: &Row) -> Match {
        Match {
            id: row.get("id"),
            season_id: row.get("season_id"),
            winner_id: row.get("winner_id"),
            loser_id: row.get("loser_id"),
            date: row.get("date"),
            shutout: row.get("shutout")
        }
    }

    fn player_from_row(row: &Row) -> Player {
        Player {
            id: row.get("id"),
            name: row.get("name"),
            rating: row.get("rating"),
            win_count: row.get("win_count"),
            loss_count: row.get("loss_count"),
            bonus_given_count: row.get("bonus_given_count"),
            bonus_taken_count: row.get("bonus_taken_count")
        }
    }

    fn season_from_row(row: &Row) -> Season {
        Season {
            id: row.get("id"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            active: row.get("active")
        }
    }

    // Access the underlying Client
    pub fn client(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }
}
