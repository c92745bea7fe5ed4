use chrono::NaiveDate;
use itertools::Itertools;

use crate::{database::db_structs::Season, model::error::ProcessorError};

/// Ids of active seasons whose end date has passed. These are expired
/// before the activation window is evaluated.
pub fn expirations(seasons: &[Season], today: NaiveDate) -> Vec<i32> {
    seasons
        .iter()
        .filter(|s| s.active && s.end_date.is_some_and(|end| end < today))
        .map(|s| s.id)
        .collect()
}

/// Picks the season to newly activate, if any.
///
/// Exactly one season's window must contain today; anything else is a
/// configuration inconsistency in the season table and is surfaced rather
/// than guessed around. When the unique covering season is already active
/// there is nothing to do; in particular, the player counter reset that
/// rides on activation must not re-fire.
pub fn activation(seasons: &[Season], today: NaiveDate) -> Result<Option<i32>, ProcessorError> {
    let covering = seasons
        .iter()
        .filter(|s| s.start_date <= today && s.end_date.is_none_or(|end| end >= today))
        .collect_vec();

    match covering.as_slice() {
        [] => Err(ProcessorError::ConfigurationInconsistency(format!(
            "no season covers {}",
            today
        ))),
        [season] => {
            if season.active {
                Ok(None)
            } else {
                Ok(Some(season.id))
            }
        }
        many => Err(ProcessorError::ConfigurationInconsistency(format!(
            "{} seasons cover {}: {:?}",
            many.len(),
            today,
            many.iter().map(|s| s.id).collect_vec()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::error::ProcessorError, utils::test_utils::generate_season};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_expired_active_season_is_expired() {
        let seasons = vec![generate_season(1, "2024-01-01", Some("2024-03-31"), true)];

        assert_eq!(expirations(&seasons, date("2024-04-01")), vec![1]);
    }

    #[test]
    fn test_ongoing_active_season_is_not_expired() {
        let seasons = vec![generate_season(1, "2024-01-01", Some("2024-03-31"), true)];

        assert!(expirations(&seasons, date("2024-03-31")).is_empty());
    }

    #[test]
    fn test_open_ended_season_never_expires() {
        let seasons = vec![generate_season(1, "2024-01-01", None, true)];

        assert!(expirations(&seasons, date("2031-01-01")).is_empty());
    }

    #[test]
    fn test_inactive_past_season_is_left_alone() {
        let seasons = vec![generate_season(1, "2023-01-01", Some("2023-12-31"), false)];

        assert!(expirations(&seasons, date("2024-06-01")).is_empty());
    }

    #[test]
    fn test_season_starting_today_activates() {
        let seasons = vec![
            generate_season(1, "2024-01-01", Some("2024-03-31"), false),
            generate_season(2, "2024-04-01", Some("2024-06-30"), false),
        ];

        assert_eq!(activation(&seasons, date("2024-04-01")).unwrap(), Some(2));
    }

    #[test]
    fn test_already_active_season_does_not_reactivate() {
        let seasons = vec![generate_season(1, "2024-01-01", Some("2024-03-31"), true)];

        assert_eq!(activation(&seasons, date("2024-02-15")).unwrap(), None);
    }

    #[test]
    fn test_open_ended_season_covers_any_later_day() {
        let seasons = vec![generate_season(1, "2024-01-01", None, false)];

        assert_eq!(activation(&seasons, date("2030-12-01")).unwrap(), Some(1));
    }

    #[test]
    fn test_no_covering_season_is_an_inconsistency() {
        let seasons = vec![generate_season(1, "2024-01-01", Some("2024-03-31"), true)];

        let result = activation(&seasons, date("2024-04-01"));

        assert!(matches!(
            result,
            Err(ProcessorError::ConfigurationInconsistency(_))
        ));
    }

    #[test]
    fn test_overlapping_seasons_are_an_inconsistency() {
        let seasons = vec![
            generate_season(1, "2024-01-01", Some("2024-06-30"), false),
            generate_season(2, "2024-04-01", None, false),
        ];

        let result = activation(&seasons, date("2024-05-01"));

        assert!(matches!(
            result,
            Err(ProcessorError::ConfigurationInconsistency(_))
        ));
    }

    #[test]
    fn test_expiry_then_activation_hands_over_cleanly() {
        let seasons = vec![
            generate_season(1, "2024-01-01", Some("2024-03-31"), true),
            generate_season(2, "2024-04-01", Some("2024-06-30"), false),
        ];
        let today = date("2024-04-01");

        assert_eq!(expirations(&seasons, today), vec![1]);
        assert_eq!(activation(&seasons, today).unwrap(), Some(2));
    }

    #[test]
    fn test_transition_is_idempotent_once_applied() {
        // State after the first run: season 1 expired, season 2 active.
        let seasons = vec![
            generate_season(1, "2024-01-01", Some("2024-03-31"), false),
            generate_season(2, "2024-04-01", Some("2024-06-30"), true),
        ];
        let today = date("2024-04-02");

        assert!(expirations(&seasons, today).is_empty());
        assert_eq!(activation(&seasons, today).unwrap(), None);
    }
}
