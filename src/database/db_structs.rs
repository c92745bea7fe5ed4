use crate::model::tracker::CycleState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub rating: i32,
    pub win_count: i32,
    pub loss_count: i32,
    pub bonus_given_count: i32,
    pub bonus_taken_count: i32
}

impl Player {
    /// The player's current-cycle counters as the settle unit shared with
    /// the replays.
    pub fn cycle_state(&self) -> CycleState {
        CycleState {
            rating: self.rating,
            win_count: self.win_count,
            loss_count: self.loss_count,
            bonus_given_count: self.bonus_given_count,
            bonus_taken_count: self.bonus_taken_count
        }
    }

    pub fn apply_cycle_state(&mut self, state: CycleState) {
        self.rating = state.rating;
        self.win_count = state.win_count;
        self.loss_count = state.loss_count;
        self.bonus_given_count = state.bonus_given_count;
        self.bonus_taken_count = state.bonus_taken_count;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: i32,
    pub start_date: NaiveDate,
    /// None means the season is open-ended.
    pub end_date: Option<NaiveDate>,
    pub active: bool
}

/// One immutable row of the match log. `id` is the persisted insertion
/// sequence and serves as the tie-break for matches sharing a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i32,
    pub season_id: i32,
    pub winner_id: i32,
    pub loser_id: i32,
    pub date: NaiveDate,
    /// Shutout qualifier. Feeds the bonus counters only, never the rating.
    pub shutout: bool
}

/// A match as submitted by the collaborator recording results. The id is
/// assigned by the database on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub season_id: i32,
    pub winner_id: i32,
    pub loser_id: i32,
    pub date: NaiveDate,
    pub shutout: bool
}

/// A player's rating immediately after one match. Exactly two of these
/// exist per match, one per participant. Fully regenerable from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryEntry {
    pub match_id: i32,
    pub player_id: i32,
    pub rating: i32
}

/// A player's final standing within one season: their tracked state as of
/// the last match they played before the season ended. Fully regenerable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSnapshot {
    pub season_id: i32,
    pub player_id: i32,
    pub rating: i32,
    pub win_count: i32,
    pub loss_count: i32
}
