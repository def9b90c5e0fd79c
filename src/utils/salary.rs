//! Current-salary resolution over a grade's append-only history.
//!
//! The current entry is the one with the latest `created_on` that is not
//! after `now`. Entries sharing that timestamp are ordered by id and the
//! highest id wins. Input order never matters.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::model::{Grade, GradeHistory, Position};

/// Resolve the entry in effect at `now`, or `None` if every entry is future-dated.
pub fn current_entry(history: &[GradeHistory], now: DateTime<Utc>) -> Option<&GradeHistory> {
    history
        .iter()
        .filter(|entry| entry.created_on <= now)
        .max_by_key(|entry| (entry.created_on, entry.id))
}

/// Current salary value of a grade at `now`.
pub fn current_salary(grade: &Grade, now: DateTime<Utc>) -> Option<i64> {
    current_entry(&grade.history, now).map(|entry| entry.value)
}

/// Ids of the current history entry of every grade in the catalog.
///
/// A staffing record's position reference must be one of these.
pub fn current_history_ids(positions: &[Position], now: DateTime<Utc>) -> HashSet<i64> {
    positions
        .iter()
        .flat_map(|position| position.grades.iter())
        .filter_map(|grade| current_entry(&grade.history, now))
        .map(|entry| entry.id)
        .collect()
}
