//! Temporal ordering of a person's employment periods.
//!
//! A new or edited period may not start before the latest period already
//! recorded for the same person. Comparison is by calendar day.

use chrono::{Days, NaiveDate};

use crate::error::StaffingError;
use crate::model::Staff;

/// Result of an ordering check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingValidationResult {
    /// The proposed start date is not earlier than any existing period.
    Valid,
    /// The proposed start date predates the latest existing period.
    Backdated {
        latest: NaiveDate,
        minimum: NaiveDate,
    },
}

/// Validate `proposed` against a person's existing staff records.
///
/// `exclude_staff_id` removes the record being edited from the comparison set.
/// Records without history carry no date and are skipped.
pub fn validate_start_date(
    existing: &[Staff],
    exclude_staff_id: Option<i64>,
    proposed: NaiveDate,
) -> OrderingValidationResult {
    let latest = existing
        .iter()
        .filter(|staff| Some(staff.id) != exclude_staff_id)
        .filter_map(|staff| staff.history.as_ref())
        .map(|history| history.created_on)
        .max();

    match latest {
        Some(latest) if latest > proposed => OrderingValidationResult::Backdated {
            latest,
            minimum: latest.checked_add_days(Days::new(1)).unwrap_or(latest),
        },
        _ => OrderingValidationResult::Valid,
    }
}

/// Creates the error surfaced for a backdated employment period.
pub fn backdated_error(person_id: i64, latest: NaiveDate, minimum: NaiveDate) -> StaffingError {
    StaffingError::AlreadyExists(format!(
        "Person {person_id} already has an employment period starting {latest}; \
         the minimum start date is {minimum}"
    ))
}
