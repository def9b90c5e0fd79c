//! Team capacity ledger.
//!
//! Enforces that a person's allocation across active team memberships never
//! exceeds 100% whenever a membership is added or its allocation changes.
//! Each operation is check-then-write over independent remote calls; with
//! `serialize_capacity_checks` off, two concurrent writes for the same
//! member can both pass the check on stale sums.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::TryStreamExt;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::config::TeamLedgerConfig;
use crate::error::{Result, StaffingError};
use crate::interfaces::TeamStore;
use crate::model::{Member, NewMember, PersonId, Team};
use crate::orchestration::RequestContext;
use crate::utils::capacity::{
    capacity_exceeded_error, check_capacity, validate_percentage, CapacityValidationResult,
};
use crate::utils::clock::Clock;

/// Per-member locks used when capacity checks are serialized.
///
/// An entry only the map references is idle; idle entries are pruned on the
/// next acquisition, so the map holds at most the members in flight.
#[derive(Default)]
struct MemberLocks {
    locks: Mutex<HashMap<PersonId, Arc<Mutex<()>>>>,
}

impl MemberLocks {
    async fn acquire(&self, person_id: PersonId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(person_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

pub struct TeamLedger {
    teams: Arc<dyn TeamStore>,
    clock: Arc<dyn Clock>,
    member_locks: Option<MemberLocks>,
}

impl TeamLedger {
    pub fn new(teams: Arc<dyn TeamStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(teams, clock, &TeamLedgerConfig::default())
    }

    pub fn with_config(
        teams: Arc<dyn TeamStore>,
        clock: Arc<dyn Clock>,
        config: &TeamLedgerConfig,
    ) -> Self {
        Self {
            teams,
            clock,
            member_locks: config
                .serialize_capacity_checks
                .then(MemberLocks::default),
        }
    }

    /// Create a team with a unique, non-empty name.
    #[tracing::instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id()))]
    pub async fn create_team(&self, ctx: &RequestContext, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StaffingError::BadRequest(
                "Team name must not be empty".to_string(),
            ));
        }
        let id = ctx
            .call("team_store.create_team", self.teams.create_team(ctx, name))
            .await?;
        info!(team_id = id, "Team created");
        Ok(id)
    }

    /// Every team with its membership rows, fully buffered.
    pub async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Team>> {
        ctx.call("team_store.get_all", async {
            self.teams.get_all(ctx).await?.try_collect().await
        })
        .await
    }

    /// Add `person_id` to `team_id` after checking their capacity on other teams.
    #[tracing::instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id()))]
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        team_id: i64,
        person_id: PersonId,
        employment_percentage: u8,
        start_work: NaiveDate,
    ) -> Result<i64> {
        validate_percentage(employment_percentage)?;
        let _guard = self.lock_member(person_id).await;

        self.require_team(ctx, team_id).await?;
        if self.find_member(ctx, person_id, team_id).await?.is_some() {
            return Err(StaffingError::AlreadyExists(format!(
                "Member {person_id} already belongs to team {team_id}"
            )));
        }
        self.ensure_capacity(ctx, person_id, team_id, employment_percentage)
            .await?;

        let member = NewMember {
            person_id,
            team_id,
            employment_percentage,
            start_work,
        };
        let id = ctx
            .call("team_store.insert_member", self.teams.insert_member(ctx, member))
            .await?;
        info!(member_id = id, "Member added");
        Ok(id)
    }

    /// Change an existing membership's allocation in place.
    #[tracing::instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id()))]
    pub async fn update_employment_percentage(
        &self,
        ctx: &RequestContext,
        team_id: i64,
        person_id: PersonId,
        employment_percentage: u8,
    ) -> Result<()> {
        validate_percentage(employment_percentage)?;
        let _guard = self.lock_member(person_id).await;

        self.require_team(ctx, team_id).await?;
        let member = self
            .find_member(ctx, person_id, team_id)
            .await?
            .ok_or_else(|| StaffingError::not_found("Member", person_id))?;
        self.ensure_capacity(ctx, person_id, team_id, employment_percentage)
            .await?;

        ctx.call(
            "team_store.update_percentage",
            self.teams
                .update_percentage(ctx, member.id, employment_percentage),
        )
        .await?;
        info!(
            member_id = member.id,
            from = member.employment_percentage,
            to = employment_percentage,
            "Member allocation updated"
        );
        Ok(())
    }

    /// End a membership. The row is kept; it stops counting toward capacity
    /// once `end_work` has passed.
    #[tracing::instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id()))]
    pub async fn set_end_work(
        &self,
        ctx: &RequestContext,
        team_id: i64,
        person_id: PersonId,
        end_work: NaiveDate,
    ) -> Result<()> {
        let member = self
            .find_member(ctx, person_id, team_id)
            .await?
            .ok_or_else(|| StaffingError::not_found("Member", person_id))?;
        if end_work < member.start_work {
            return Err(StaffingError::BadRequest(format!(
                "End of work {end_work} precedes start of work {}",
                member.start_work
            )));
        }

        ctx.call(
            "team_store.set_end_work",
            self.teams.set_end_work(ctx, member.id, end_work),
        )
        .await?;
        info!(member_id = member.id, %end_work, "Member end of work set");
        Ok(())
    }

    async fn lock_member(&self, person_id: PersonId) -> Option<OwnedMutexGuard<()>> {
        match &self.member_locks {
            Some(locks) => Some(locks.acquire(person_id).await),
            None => None,
        }
    }

    async fn require_team(&self, ctx: &RequestContext, team_id: i64) -> Result<()> {
        ctx.call("team_store.get_team", self.teams.get_team(ctx, team_id))
            .await?
            .map(|_| ())
            .ok_or_else(|| StaffingError::not_found("Team", team_id))
    }

    async fn find_member(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
        team_id: i64,
    ) -> Result<Option<Member>> {
        ctx.call(
            "team_store.find_member",
            self.teams.find_member(ctx, person_id, team_id),
        )
        .await
    }

    async fn ensure_capacity(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
        team_id: i64,
        proposed: u8,
    ) -> Result<()> {
        let memberships: Vec<Member> = ctx
            .call("team_store.get_by_person", async {
                self.teams.get_by_person(ctx, person_id).await?.try_collect().await
            })
            .await?;

        match check_capacity(&memberships, team_id, proposed, self.clock.today()) {
            CapacityValidationResult::Within { total } => {
                tracing::debug!(total, "Capacity check passed");
                Ok(())
            }
            CapacityValidationResult::Exceeded {
                other_teams,
                proposed,
            } => {
                warn!(other_teams, proposed, "Capacity exceeded");
                Err(capacity_exceeded_error(person_id, other_teams, proposed))
            }
        }
    }
}
