use crate::{database::db_structs::Match, model::error::ProcessorError};

/// Sorts the match log into replay order: ascending by `(date, id)`.
///
/// Many matches legitimately share a date; the persisted insertion id is the
/// documented tie-break, which keeps every replay of the same log
/// deterministic. A duplicate `(date, id)` key has no defined order and is
/// rejected rather than resolved arbitrarily.
pub fn sort_chronologically(matches: &mut [Match]) -> Result<(), ProcessorError> {
    matches.sort_by_key(|m| (m.date, m.id));

    for window in matches.windows(2) {
        if window[0].date == window[1].date && window[0].id == window[1].id {
            return Err(ProcessorError::OrderingAmbiguity {
                date: window[0].date,
                match_id: window[0].id
            });
        }
    }

    Ok(())
}
