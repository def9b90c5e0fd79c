//! In-memory team store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;
use tokio::sync::RwLock;

use super::IdSequence;
use crate::error::{Result, StaffingError};
use crate::interfaces::{RemoteStream, TeamStore};
use crate::model::{Member, NewMember, PersonId, Team};
use crate::orchestration::RequestContext;

#[derive(Default)]
pub struct MemoryTeamStore {
    teams: RwLock<BTreeMap<i64, Team>>,
    team_ids: IdSequence,
    member_ids: IdSequence,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update_member<F>(&self, member_id: i64, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Member) + Send,
    {
        let mut teams = self.teams.write().await;
        let member = teams
            .values_mut()
            .flat_map(|t| t.members.iter_mut())
            .find(|m| m.id == member_id)
            .ok_or_else(|| StaffingError::not_found("Member", member_id))?;
        apply(member);
        Ok(())
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn create_team(&self, _ctx: &RequestContext, name: &str) -> Result<i64> {
        let mut teams = self.teams.write().await;
        if teams.values().any(|t| t.name == name) {
            return Err(StaffingError::AlreadyExists(format!(
                "Team with name '{name}' already exists"
            )));
        }
        let id = self.team_ids.next();
        teams.insert(
            id,
            Team {
                id,
                name: name.to_string(),
                members: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn get_all(&self, _ctx: &RequestContext) -> Result<RemoteStream<Team>> {
        let teams: Vec<Team> = self.teams.read().await.values().cloned().collect();
        Ok(futures::stream::iter(teams.into_iter().map(Ok)).boxed())
    }

    async fn get_team(&self, _ctx: &RequestContext, team_id: i64) -> Result<Option<Team>> {
        Ok(self.teams.read().await.get(&team_id).cloned())
    }

    async fn find_member(
        &self,
        _ctx: &RequestContext,
        person_id: PersonId,
        team_id: i64,
    ) -> Result<Option<Member>> {
        Ok(self.teams.read().await.get(&team_id).and_then(|t| {
            t.members
                .iter()
                .find(|m| m.person_id == person_id)
                .cloned()
        }))
    }

    async fn get_by_person(
        &self,
        _ctx: &RequestContext,
        person_id: PersonId,
    ) -> Result<RemoteStream<Member>> {
        let members: Vec<Member> = self
            .teams
            .read()
            .await
            .values()
            .flat_map(|t| t.members.iter())
            .filter(|m| m.person_id == person_id)
            .cloned()
            .collect();
        Ok(futures::stream::iter(members.into_iter().map(Ok)).boxed())
    }

    async fn insert_member(&self, _ctx: &RequestContext, member: NewMember) -> Result<i64> {
        let mut teams = self.teams.write().await;
        let team = teams
            .get_mut(&member.team_id)
            .ok_or_else(|| StaffingError::not_found("Team", member.team_id))?;
        if team.members.iter().any(|m| m.person_id == member.person_id) {
            return Err(StaffingError::AlreadyExists(format!(
                "Member {} already belongs to team {}",
                member.person_id, member.team_id
            )));
        }
        let id = self.member_ids.next();
        team.members.push(Member {
            id,
            person_id: member.person_id,
            team_id: member.team_id,
            employment_percentage: member.employment_percentage,
            start_work: member.start_work,
            end_work: None,
        });
        Ok(id)
    }

    async fn update_percentage(
        &self,
        _ctx: &RequestContext,
        member_id: i64,
        percentage: u8,
    ) -> Result<()> {
        self.update_member(member_id, |m| m.employment_percentage = percentage)
            .await
    }

    async fn set_end_work(
        &self,
        _ctx: &RequestContext,
        member_id: i64,
        end_work: NaiveDate,
    ) -> Result<()> {
        self.update_member(member_id, |m| m.end_work = Some(end_work))
            .await
    }
}
