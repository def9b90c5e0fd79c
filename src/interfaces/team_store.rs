//! Team store interface.
//!
//! Plain storage for teams and membership rows. The capacity invariant is
//! enforced above this layer by the team ledger.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::RemoteStream;
use crate::error::Result;
use crate::model::{Member, NewMember, PersonId, Team};
use crate::orchestration::RequestContext;

#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Create a team. Fails with `AlreadyExists` when the name is taken.
    async fn create_team(&self, ctx: &RequestContext, name: &str) -> Result<i64>;

    /// Every team with its membership rows.
    async fn get_all(&self, ctx: &RequestContext) -> Result<RemoteStream<Team>>;

    /// Load one team with its members, `None` when absent.
    async fn get_team(&self, ctx: &RequestContext, team_id: i64) -> Result<Option<Team>>;

    /// Membership row for the `(person, team)` pair, if any.
    async fn find_member(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
        team_id: i64,
    ) -> Result<Option<Member>>;

    /// Every membership row of a person across all teams.
    async fn get_by_person(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
    ) -> Result<RemoteStream<Member>>;

    /// Insert a membership row. Fails with `AlreadyExists` for a duplicate pair.
    async fn insert_member(&self, ctx: &RequestContext, member: NewMember) -> Result<i64>;

    async fn update_percentage(&self, ctx: &RequestContext, member_id: i64, percentage: u8)
        -> Result<()>;

    async fn set_end_work(&self, ctx: &RequestContext, member_id: i64, end_work: NaiveDate)
        -> Result<()>;
}
