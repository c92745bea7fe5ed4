use std::collections::HashMap;

use crate::{
    database::db_structs::Match,
    model::{constants::DEFAULT_RATING, elo}
};

/// A player's denormalized counters for one season cycle. This is the unit
/// the live path reads from and writes back to the player row, and the unit
/// the replays track per player while scanning the log. Both paths settle
/// matches through [`settle`], so their numbers cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleState {
    pub rating: i32,
    pub win_count: i32,
    pub loss_count: i32,
    pub bonus_given_count: i32,
    pub bonus_taken_count: i32
}

impl Default for CycleState {
    fn default() -> Self {
        CycleState {
            rating: DEFAULT_RATING,
            win_count: 0,
            loss_count: 0,
            bonus_given_count: 0,
            bonus_taken_count: 0
        }
    }
}

/// Settles one decided match: rates both participants and bumps the
/// win/loss counters. A shutout additionally bumps the winner's
/// `bonus_given_count` and the loser's `bonus_taken_count`; the shutout
/// qualifier never feeds into the rating itself.
pub fn settle(winner: CycleState, loser: CycleState, shutout: bool) -> (CycleState, CycleState) {
    let (winner_rating, loser_rating) = elo::rate(winner.rating, loser.rating);

    let settled_winner = CycleState {
        rating: winner_rating,
        win_count: winner.win_count + 1,
        bonus_given_count: winner.bonus_given_count + i32::from(shutout),
        ..winner
    };

    let settled_loser = CycleState {
        rating: loser_rating,
        loss_count: loser.loss_count + 1,
        bonus_taken_count: loser.bonus_taken_count + i32::from(shutout),
        ..loser
    };

    (settled_winner, settled_loser)
}

struct TrackedCycle {
    last_season_seen: i32,
    state: CycleState
}

/// Per-player tracked state for a chronological scan of the match log.
///
/// A player starts from [`CycleState::default`] the first time they appear
/// and again whenever a match carries a different season than the one they
/// were last seen in. That reproduces the season-activation reset purely
/// from the log, without consulting season activation history.
#[derive(Default)]
pub struct SeasonLedger {
    tracked: HashMap<i32, TrackedCycle>
}

impl SeasonLedger {
    pub fn new() -> SeasonLedger {
        SeasonLedger {
            tracked: HashMap::new()
        }
    }

    /// Settles `m` against the tracked states of both participants and
    /// returns their post-match states.
    pub fn apply(&mut self, m: &Match) -> (CycleState, CycleState) {
        let winner = self.state_for(m.winner_id, m.season_id);
        let loser = self.state_for(m.loser_id, m.season_id);

        let (winner, loser) = settle(winner, loser, m.shutout);

        self.track(m.winner_id, m.season_id, winner);
        self.track(m.loser_id, m.season_id, loser);

        (winner, loser)
    }

    fn state_for(&self, player_id: i32, season_id: i32) -> CycleState {
        match self.tracked.get(&player_id) {
            Some(cycle) if cycle.last_season_seen == season_id => cycle.state,
            _ => CycleState::default()
        }
    }

    fn track(&mut self, player_id: i32, season_id: i32, state: CycleState) {
        self.tracked.insert(
            player_id,
            TrackedCycle {
                last_season_seen: season_id,
                state
            }
        );
    }
}
