use crate::model::constants::K_FACTOR;

/// Computes the post-match rating pair for a decided head-to-head match.
///
/// Expected score for the winner is `1 / (1 + 10^((loser - winner) / 400))`.
/// Both new ratings are rounded to the nearest integer with ties away from
/// zero (`f64::round`). The rounding rule is part of the contract: the live
/// path and the replays all round the same way, otherwise regenerated
/// history diverges from what was recorded incrementally.
pub fn rate(winner_rating: i32, loser_rating: i32) -> (i32, i32) {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = 1.0 - expected_winner;

    let new_winner = winner_rating as f64 + K_FACTOR * (1.0 - expected_winner);
    let new_loser = loser_rating as f64 + K_FACTOR * (0.0 - expected_loser);

    (new_winner.round() as i32, new_loser.round() as i32)
}

fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) as f64 / 400.0))
}
