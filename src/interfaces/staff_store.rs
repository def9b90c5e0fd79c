//! Staff aggregate store interface.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::RemoteStream;
use crate::error::Result;
use crate::model::{NewHistory, PersonId, Staff};
use crate::orchestration::RequestContext;

/// Owner of staff rows and their single history record.
///
/// Each setter is an independent remote write; there is no combined update.
#[async_trait]
pub trait StaffStore: Send + Sync {
    /// Create a staff row and return its generated id.
    async fn create(&self, ctx: &RequestContext, position_id: i64, manager_id: PersonId)
        -> Result<i64>;

    /// Attach the history record to an existing staff row.
    async fn create_history(&self, ctx: &RequestContext, history: NewHistory) -> Result<i64>;

    async fn set_manager(&self, ctx: &RequestContext, staff_id: i64, manager_id: PersonId)
        -> Result<()>;

    async fn set_position(&self, ctx: &RequestContext, staff_id: i64, position_id: i64)
        -> Result<()>;

    async fn set_date(&self, ctx: &RequestContext, staff_id: i64, created_on: NaiveDate)
        -> Result<()>;

    async fn set_employment(&self, ctx: &RequestContext, staff_id: i64, percentage: u8)
        -> Result<()>;

    async fn set_mentor(
        &self,
        ctx: &RequestContext,
        staff_id: i64,
        mentor_id: Option<PersonId>,
    ) -> Result<()>;

    /// Load a staff row with its history. Fails with `NotFound` when absent.
    async fn get_by_id(&self, ctx: &RequestContext, id: i64) -> Result<Staff>;

    /// Every staff row whose history belongs to `person_id`.
    async fn get_by_person(
        &self,
        ctx: &RequestContext,
        person_id: PersonId,
    ) -> Result<RemoteStream<Staff>>;
}
