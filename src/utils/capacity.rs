//! Capacity check over a person's team memberships.
//!
//! The allocation on the team being written is excluded from the sum, so
//! changing a person's allocation on one team never counts against itself.

use chrono::NaiveDate;

use crate::error::StaffingError;
use crate::model::Member;

/// Upper bound on a person's total allocation across active memberships.
pub const MAX_ALLOCATION: u32 = 100;

/// Result of a capacity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityValidationResult {
    Within { total: u32 },
    Exceeded { other_teams: u32, proposed: u8 },
}

/// Check `proposed` on `team_id` against the person's active rows on other teams.
pub fn check_capacity(
    memberships: &[Member],
    team_id: i64,
    proposed: u8,
    today: NaiveDate,
) -> CapacityValidationResult {
    let other_teams: u32 = memberships
        .iter()
        .filter(|member| member.team_id != team_id)
        .filter(|member| member.is_active_on(today))
        .map(|member| u32::from(member.employment_percentage))
        .sum();

    let total = other_teams + u32::from(proposed);
    if total > MAX_ALLOCATION {
        CapacityValidationResult::Exceeded {
            other_teams,
            proposed,
        }
    } else {
        CapacityValidationResult::Within { total }
    }
}

/// Creates the error surfaced when an allocation would exceed capacity.
pub fn capacity_exceeded_error(person_id: i64, other_teams: u32, proposed: u8) -> StaffingError {
    StaffingError::BadRequest(format!(
        "Member {person_id} is already allocated {other_teams}% on other teams; \
         {proposed}% more would exceed {MAX_ALLOCATION}%"
    ))
}

/// Reject percentages outside 0..=100.
pub fn validate_percentage(percentage: u8) -> Result<(), StaffingError> {
    if u32::from(percentage) > MAX_ALLOCATION {
        return Err(StaffingError::BadRequest(format!(
            "Employment percentage must be between 0 and {MAX_ALLOCATION}, got {percentage}"
        )));
    }
    Ok(())
}
