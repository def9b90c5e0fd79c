//! Staffing data model.
//!
//! Identifiers are store-generated `i64` values. Person identity is owned by
//! the person directory and only ever referenced here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a person in the person directory.
pub type PersonId = i64;

/// A staffing record: one assignment of a person under a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub id: i64,
    pub manager_id: PersonId,
    pub position_id: i64,
    /// Owned 1:1; absent only inside the create window between the two writes.
    pub history: Option<History>,
}

/// Mutable detail of a staffing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub id: i64,
    pub staff_id: i64,
    pub person_id: PersonId,
    pub mentor_id: Option<PersonId>,
    /// Start of the employment period. Calendar date, no time-of-day.
    pub created_on: NaiveDate,
    pub employment_percentage: u8,
}

/// One salary version of a grade. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeHistory {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    pub value: i64,
}

/// Compensation tier within a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub grade: i32,
    pub history: Vec<GradeHistory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub name: String,
    pub grades: Vec<Grade>,
}

/// One person's allocation within one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub person_id: PersonId,
    pub team_id: i64,
    pub employment_percentage: u8,
    pub start_work: NaiveDate,
    /// `None` while the membership is active.
    pub end_work: Option<NaiveDate>,
}

impl Member {
    /// Whether the membership still counts toward the person's capacity on `today`.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        match self.end_work {
            None => true,
            Some(end) => end > today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub members: Vec<Member>,
}

/// Initial salary for a grade supplied when a position is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGrade {
    pub grade: i32,
    pub initial_salary: i64,
    pub created_on: DateTime<Utc>,
}

/// Unsaved history row handed to the staff store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistory {
    pub staff_id: i64,
    pub person_id: PersonId,
    pub mentor_id: Option<PersonId>,
    pub created_on: NaiveDate,
    pub employment_percentage: u8,
}

/// Unsaved membership row handed to the team store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub person_id: PersonId,
    pub team_id: i64,
    pub employment_percentage: u8,
    pub start_work: NaiveDate,
}
