//! Employment orchestrator.
//!
//! Creates and edits staffing records whose references live in other
//! services. Every reference is checked by its own remote call before the
//! first write, and the first failed check aborts the workflow.
//!
//! Writes are not atomic. A create issues two writes (staff, then history);
//! an update issues one setter per changed field. A failure part way leaves
//! the earlier writes in place and is logged with the ids needed to
//! reconcile by hand.

mod diff;

pub use diff::{plan_changes, FieldChange};

use std::sync::Arc;

use chrono::NaiveDate;
use futures::TryStreamExt;
use tracing::{error, info};

use crate::error::{Result, StaffingError};
use crate::interfaces::{PersonDirectory, PositionCatalog, StaffStore};
use crate::model::{NewHistory, PersonId, Position, Staff};
use crate::orchestration::RequestContext;
use crate::storage::Collaborators;
use crate::utils::capacity::validate_percentage;
use crate::utils::clock::Clock;
use crate::utils::ordering::{backdated_error, validate_start_date, OrderingValidationResult};
use crate::utils::salary::current_history_ids;

/// Request to open a new employment period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployment {
    pub person_id: PersonId,
    pub manager_id: PersonId,
    pub mentor_id: Option<PersonId>,
    /// Current grade history id of the position/grade being staffed.
    pub position_id: i64,
    pub start_date: NaiveDate,
    pub employment_percentage: u8,
}

/// Request to edit an existing staffing record. The person is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmployment {
    pub staff_id: i64,
    pub manager_id: PersonId,
    pub mentor_id: Option<PersonId>,
    pub position_id: i64,
    pub start_date: NaiveDate,
    pub employment_percentage: u8,
}

pub struct EmploymentOrchestrator {
    people: Arc<dyn PersonDirectory>,
    positions: Arc<dyn PositionCatalog>,
    staff: Arc<dyn StaffStore>,
    clock: Arc<dyn Clock>,
}

impl EmploymentOrchestrator {
    pub fn new(
        people: Arc<dyn PersonDirectory>,
        positions: Arc<dyn PositionCatalog>,
        staff: Arc<dyn StaffStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            people,
            positions,
            staff,
            clock,
        }
    }

    pub fn from_collaborators(collaborators: &Collaborators, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            collaborators.people.clone(),
            collaborators.positions.clone(),
            collaborators.staff.clone(),
            clock,
        )
    }

    /// Validate references and ordering, then write the staff row and its history.
    ///
    /// Returns the new staff id.
    #[tracing::instrument(
        skip(self, ctx, request),
        fields(
            correlation_id = %ctx.correlation_id(),
            person_id = request.person_id,
            start_date = %request.start_date,
        )
    )]
    pub async fn create_employment(
        &self,
        ctx: &RequestContext,
        request: CreateEmployment,
    ) -> Result<i64> {
        validate_percentage(request.employment_percentage)?;

        self.require_person(ctx, "Person", request.person_id).await?;
        self.require_person(ctx, "Manager", request.manager_id).await?;
        if let Some(mentor_id) = request.mentor_id {
            self.require_person(ctx, "Mentor", mentor_id).await?;
        }
        self.require_position(ctx, request.position_id).await?;
        self.require_ordering(ctx, request.person_id, None, request.start_date)
            .await?;

        let staff_id = ctx
            .call(
                "staff_store.create",
                self.staff
                    .create(ctx, request.position_id, request.manager_id),
            )
            .await?;

        let history = NewHistory {
            staff_id,
            person_id: request.person_id,
            mentor_id: request.mentor_id,
            created_on: request.start_date,
            employment_percentage: request.employment_percentage,
        };
        if let Err(e) = ctx
            .call(
                "staff_store.create_history",
                self.staff.create_history(ctx, history),
            )
            .await
        {
            error!(
                staff_id,
                person_id = request.person_id,
                manager_id = request.manager_id,
                position_id = request.position_id,
                error = %e,
                "Staff row created without history; manual reconciliation required"
            );
            return Err(e);
        }

        info!(staff_id, "Employment created");
        Ok(staff_id)
    }

    /// Validate references and ordering, then write only the fields that changed.
    #[tracing::instrument(
        skip(self, ctx, request),
        fields(correlation_id = %ctx.correlation_id(), staff_id = request.staff_id)
    )]
    pub async fn update_employment(
        &self,
        ctx: &RequestContext,
        request: UpdateEmployment,
    ) -> Result<()> {
        validate_percentage(request.employment_percentage)?;

        let current = ctx
            .call(
                "staff_store.get_by_id",
                self.staff.get_by_id(ctx, request.staff_id),
            )
            .await?;
        let history = current
            .history
            .clone()
            .ok_or_else(|| StaffingError::not_found("History", request.staff_id))?;

        self.require_person(ctx, "Manager", request.manager_id).await?;
        if let Some(mentor_id) = request.mentor_id {
            self.require_person(ctx, "Mentor", mentor_id).await?;
        }
        self.require_position(ctx, request.position_id).await?;
        self.require_ordering(
            ctx,
            history.person_id,
            Some(request.staff_id),
            request.start_date,
        )
        .await?;

        let changes = plan_changes(&current, &history, &request);
        if changes.is_empty() {
            info!("Employment unchanged; no writes issued");
            return Ok(());
        }

        let mut applied: Vec<&'static str> = Vec::with_capacity(changes.len());
        for change in &changes {
            if let Err(e) = self.apply_change(ctx, request.staff_id, *change).await {
                if !applied.is_empty() {
                    error!(
                        person_id = history.person_id,
                        applied = ?applied,
                        failed = change.name(),
                        error = %e,
                        "Employment partially updated; manual reconciliation required"
                    );
                }
                return Err(e);
            }
            applied.push(change.name());
        }

        info!(changed = ?applied, "Employment updated");
        Ok(())
    }

    async fn apply_change(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        change: FieldChange,
    ) -> Result<()> {
        match change {
            FieldChange::Manager(manager_id) => {
                ctx.call(
                    "staff_store.set_manager",
                    self.staff.set_manager(ctx, staff_id, manager_id),
                )
                .await
            }
            FieldChange::Position(position_id) => {
                ctx.call(
                    "staff_store.set_position",
                    self.staff.set_position(ctx, staff_id, position_id),
                )
                .await
            }
            FieldChange::Date(created_on) => {
                ctx.call(
                    "staff_store.set_date",
                    self.staff.set_date(ctx, staff_id, created_on),
                )
                .await
            }
            FieldChange::Employment(percentage) => {
                ctx.call(
                    "staff_store.set_employment",
                    self.staff.set_employment(ctx, staff_id, percentage),
                )
                .await
            }
            FieldChange::Mentor(mentor_id) => {
                ctx.call(
                    "staff_store.set_mentor",
                    self.staff.set_mentor(ctx, staff_id, mentor_id),
                )
                .await
            }
        }
    }

    async fn require_person(
        &self,
        ctx: &RequestContext,
        role: &'static str,
        id: PersonId,
    ) -> Result<()> {
        let exists = ctx
            .call("person_directory.exists", self.people.exists(ctx, id))
            .await?;
        if exists {
            Ok(())
        } else {
            info!(role, id, "Referenced person not found");
            Err(StaffingError::not_found(role, id))
        }
    }

    async fn require_position(&self, ctx: &RequestContext, position_id: i64) -> Result<()> {
        let positions: Vec<Position> = ctx
            .call("position_catalog.get_all", async {
                self.positions.get_all(ctx).await?.try_collect().await
            })
            .await?;
        if current_history_ids(&positions, self.clock.now()).contains(&position_id) {
            Ok(())
        } else {
            info!(position_id, "Position not found among current grade entries");
            Err(StaffingError::not_found("Position", position_id))
        }
    }

    async fn require_ordering(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
        exclude_staff_id: Option<i64>,
        start_date: NaiveDate,
    ) -> Result<()> {
        let existing: Vec<Staff> = ctx
            .call("staff_store.get_by_person", async {
                self.staff.get_by_person(ctx, person_id).await?.try_collect().await
            })
            .await?;
        match validate_start_date(&existing, exclude_staff_id, start_date) {
            OrderingValidationResult::Valid => Ok(()),
            OrderingValidationResult::Backdated { latest, minimum } => {
                info!(%latest, %minimum, "Employment period backdated");
                Err(backdated_error(person_id, latest, minimum))
            }
        }
    }
}
