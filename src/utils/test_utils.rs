use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::database::db_structs::{Match, Player, Season};
use crate::model::constants::DEFAULT_RATING;

pub fn generate_player(id: i32, name: &str) -> Player {
    Player {
        id,
        name: name.to_string(),
        rating: DEFAULT_RATING,
        win_count: 0,
        loss_count: 0,
        bonus_given_count: 0,
        bonus_taken_count: 0
    }
}

pub fn generate_season(id: i32, start_date: &str, end_date: Option<&str>, active: bool) -> Season {
    Season {
        id,
        start_date: parse_date(start_date),
        end_date: end_date.map(parse_date),
        active
    }
}

pub fn generate_match(id: i32, season_id: i32, winner_id: i32, loser_id: i32, date: &str, shutout: bool) -> Match {
    Match {
        id,
        season_id,
        winner_id,
        loser_id,
        date: parse_date(date),
        shutout
    }
}

/// Generates a match log spanning three seasons, `matches_per_season` each,
/// with pairings drawn from `player_ids`. The RNG is seeded for
/// reproducible results; dates are non-decreasing within a season, so the
/// generated order is already the `(date, id)` replay order.
pub fn generate_match_log(matches_per_season: i32, player_ids: &[i32]) -> Vec<Match> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut log = Vec::with_capacity(matches_per_season as usize * 3);
    let mut match_id = 0;

    for (season_id, month) in [(1, 1), (2, 4), (3, 7)] {
        for n in 0..matches_per_season {
            let winner_idx = rng.random_range(0..player_ids.len());
            let mut loser_idx = rng.random_range(0..player_ids.len());
            while loser_idx == winner_idx {
                loser_idx = rng.random_range(0..player_ids.len());
            }

            match_id += 1;
            log.push(Match {
                id: match_id,
                season_id,
                winner_id: player_ids[winner_idx],
                loser_id: player_ids[loser_idx],
                date: NaiveDate::from_ymd_opt(2024, month, 1 + (n as u32 / 4).min(27)).unwrap(),
                shutout: rng.random_range(0..5) == 0
            });
        }
    }

    log
}

fn parse_date(date: &str) -> NaiveDate {
    date.parse().expect("test dates must be YYYY-MM-DD")
}
