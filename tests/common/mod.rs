//! Shared fixtures for staffing integration tests.
//!
//! Wires the in-memory collaborators to the orchestrator, the team ledger
//! and the position registry, with a clock pinned to 2024-06-01. Also holds
//! store wrappers that interleave or interrupt workflows at a chosen call.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use staffing::config::TeamLedgerConfig;
use staffing::interfaces::{RemoteStream, StaffStore, TeamStore};
use staffing::model::{Member, NewGrade, NewMember, NewHistory, PersonId, Staff, Team};
use staffing::orchestration::{CancelHandle, EmploymentOrchestrator, RequestContext};
use staffing::services::{PositionRegistry, TeamLedger};
use staffing::storage::{
    Collaborators, MemoryPersonDirectory, MemoryPositionCatalog, MemoryStaffStore,
    MemoryTeamStore, StaffCall,
};
use staffing::Result;
use staffing::utils::clock::{Clock, FixedClock};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct Harness {
    pub people: Arc<MemoryPersonDirectory>,
    pub positions: Arc<MemoryPositionCatalog>,
    pub staff: Arc<MemoryStaffStore>,
    pub teams: Arc<MemoryTeamStore>,
    pub orchestrator: EmploymentOrchestrator,
    pub ledger: TeamLedger,
    pub registry: PositionRegistry,
}

impl Harness {
    pub async fn new() -> Self {
        Self::build(TeamLedgerConfig::default(), false).await
    }

    /// Harness whose ledger yields to other tasks between its capacity read
    /// and its write, so concurrent requests interleave.
    pub async fn interleaved(config: TeamLedgerConfig) -> Self {
        Self::build(config, true).await
    }

    async fn build(config: TeamLedgerConfig, interleave: bool) -> Self {
        let people = Arc::new(MemoryPersonDirectory::new());
        let positions = Arc::new(MemoryPositionCatalog::new());
        let staff = Arc::new(MemoryStaffStore::new());
        let teams = Arc::new(MemoryTeamStore::new());
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));

        let collaborators = Collaborators {
            people: people.clone(),
            positions: positions.clone(),
            staff: staff.clone(),
            teams: teams.clone(),
        };

        Self {
            orchestrator: EmploymentOrchestrator::from_collaborators(&collaborators, clock.clone()),
            ledger: if interleave {
                TeamLedger::with_config(
                    Arc::new(YieldingTeamStore(teams.clone())),
                    clock.clone(),
                    &config,
                )
            } else {
                TeamLedger::with_config(teams.clone(), clock.clone(), &config)
            },
            registry: PositionRegistry::new(positions.clone(), clock),
            people,
            positions,
            staff,
            teams,
        }
    }

    pub async fn register_people(&self, ids: &[i64]) {
        for id in ids {
            self.people.register(*id).await;
        }
    }

    /// Create a single-grade position and return its current history id.
    pub async fn position(&self, name: &str, salary: i64) -> i64 {
        let ctx = RequestContext::new();
        let position_id = self
            .registry
            .create_position(
                &ctx,
                name,
                vec![NewGrade {
                    grade: 1,
                    initial_salary: salary,
                    created_on: now() - Duration::days(180),
                }],
            )
            .await
            .unwrap();
        self.registry
            .current_salaries(&ctx)
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.position_id == position_id)
            .map(|s| s.history_id)
            .unwrap()
    }
}

/// Team store that yields after snapshotting a person's memberships, so
/// every concurrent request reads before any of them writes.
pub struct YieldingTeamStore(pub Arc<MemoryTeamStore>);

#[async_trait]
impl TeamStore for YieldingTeamStore {
    async fn create_team(&self, ctx: &RequestContext, name: &str) -> Result<i64> {
        self.0.create_team(ctx, name).await
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<RemoteStream<Team>> {
        self.0.get_all(ctx).await
    }

    async fn get_team(&self, ctx: &RequestContext, team_id: i64) -> Result<Option<Team>> {
        self.0.get_team(ctx, team_id).await
    }

    async fn find_member(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
        team_id: i64,
    ) -> Result<Option<Member>> {
        self.0.find_member(ctx, person_id, team_id).await
    }

    async fn get_by_person(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
    ) -> Result<RemoteStream<Member>> {
        let members = self.0.get_by_person(ctx, person_id).await?;
        tokio::task::yield_now().await;
        Ok(members)
    }

    async fn insert_member(
        &self,
        ctx: &RequestContext,
        member: NewMember,
    ) -> Result<i64> {
        self.0.insert_member(ctx, member).await
    }

    async fn update_percentage(
        &self,
        ctx: &RequestContext,
        member_id: i64,
        percentage: u8,
    ) -> Result<()> {
        self.0.update_percentage(ctx, member_id, percentage).await
    }

    async fn set_end_work(
        &self,
        ctx: &RequestContext,
        member_id: i64,
        end_work: NaiveDate,
    ) -> Result<()> {
        self.0.set_end_work(ctx, member_id, end_work).await
    }
}

/// Staff store that cancels the request right after `trigger` completes.
pub struct CancellingStaffStore {
    pub inner: Arc<MemoryStaffStore>,
    pub trigger: StaffCall,
    pub handle: CancelHandle,
}

impl CancellingStaffStore {
    fn after<T>(&self, call: StaffCall, result: Result<T>) -> Result<T> {
        if call == self.trigger {
            self.handle.cancel();
        }
        result
    }
}

#[async_trait]
impl StaffStore for CancellingStaffStore {
    async fn create(
        &self,
        ctx: &RequestContext,
        position_id: i64,
        manager_id: PersonId,
    ) -> Result<i64> {
        let result = self.inner.create(ctx, position_id, manager_id).await;
        self.after(StaffCall::Create, result)
    }

    async fn create_history(&self, ctx: &RequestContext, history: NewHistory) -> Result<i64> {
        let result = self.inner.create_history(ctx, history).await;
        self.after(StaffCall::CreateHistory, result)
    }

    async fn set_manager(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        manager_id: PersonId,
    ) -> Result<()> {
        let result = self.inner.set_manager(ctx, staff_id, manager_id).await;
        self.after(StaffCall::SetManager, result)
    }

    async fn set_position(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        position_id: i64,
    ) -> Result<()> {
        let result = self.inner.set_position(ctx, staff_id, position_id).await;
        self.after(StaffCall::SetPosition, result)
    }

    async fn set_date(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        created_on: NaiveDate,
    ) -> Result<()> {
        let result = self.inner.set_date(ctx, staff_id, created_on).await;
        self.after(StaffCall::SetDate, result)
    }

    async fn set_employment(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        percentage: u8,
    ) -> Result<()> {
        let result = self.inner.set_employment(ctx, staff_id, percentage).await;
        self.after(StaffCall::SetEmployment, result)
    }

    async fn set_mentor(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        mentor_id: Option<PersonId>,
    ) -> Result<()> {
        let result = self.inner.set_mentor(ctx, staff_id, mentor_id).await;
        self.after(StaffCall::SetMentor, result)
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Staff> {
        self.inner.get_by_id(ctx, id).await
    }

    async fn get_by_person(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
    ) -> Result<RemoteStream<Staff>> {
        self.inner.get_by_person(ctx, person_id).await
    }
}

/// Orchestrator over the harness collaborators whose staff writes go
/// through `staff`.
pub fn orchestrator_with_staff(h: &Harness, staff: Arc<dyn StaffStore>) -> EmploymentOrchestrator {
    EmploymentOrchestrator::new(
        h.people.clone(),
        h.positions.clone(),
        staff,
        Arc::new(FixedClock(now())),
    )
}
