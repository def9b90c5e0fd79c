//! Field-level diff between a stored staff record and a proposed edit.
//!
//! Only fields whose proposed value differs from the stored value produce a
//! change, so an edit that repeats the current values produces no writes.

use chrono::NaiveDate;

use super::UpdateEmployment;
use crate::model::{History, PersonId, Staff};

/// One remote "set" call to issue against the staff store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    Manager(PersonId),
    Position(i64),
    Date(NaiveDate),
    Employment(u8),
    Mentor(Option<PersonId>),
}

impl FieldChange {
    pub fn name(&self) -> &'static str {
        match self {
            FieldChange::Manager(_) => "manager",
            FieldChange::Position(_) => "position",
            FieldChange::Date(_) => "date",
            FieldChange::Employment(_) => "employment",
            FieldChange::Mentor(_) => "mentor",
        }
    }
}

/// Changes needed to bring `staff`/`history` to `update`, in write order.
pub fn plan_changes(staff: &Staff, history: &History, update: &UpdateEmployment) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if staff.manager_id != update.manager_id {
        changes.push(FieldChange::Manager(update.manager_id));
    }
    if staff.position_id != update.position_id {
        changes.push(FieldChange::Position(update.position_id));
    }
    if history.created_on != update.start_date {
        changes.push(FieldChange::Date(update.start_date));
    }
    if history.employment_percentage != update.employment_percentage {
        changes.push(FieldChange::Employment(update.employment_percentage));
    }
    if history.mentor_id != update.mentor_id {
        changes.push(FieldChange::Mentor(update.mentor_id));
    }
    changes
}
