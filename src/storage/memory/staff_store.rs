//! In-memory staff aggregate store.
//!
//! Records every write in a call journal so callers can assert exactly
//! which remote writes a workflow issued.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;
use tokio::sync::RwLock;

use super::IdSequence;
use crate::error::{Result, StaffingError};
use crate::interfaces::{RemoteStream, StaffStore};
use crate::model::{History, NewHistory, PersonId, Staff};
use crate::orchestration::RequestContext;

/// One write issued against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffCall {
    Create,
    CreateHistory,
    SetManager,
    SetPosition,
    SetDate,
    SetEmployment,
    SetMentor,
}

#[derive(Default)]
pub struct MemoryStaffStore {
    rows: RwLock<BTreeMap<i64, Staff>>,
    staff_ids: IdSequence,
    history_ids: IdSequence,
    calls: RwLock<Vec<StaffCall>>,
    fail_on: RwLock<HashSet<StaffCall>>,
}

impl MemoryStaffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes issued so far, in order. Failed writes are included.
    pub async fn calls(&self) -> Vec<StaffCall> {
        self.calls.read().await.clone()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    /// Make every subsequent `call` fail with `Unavailable`.
    pub async fn set_fail_on(&self, call: StaffCall, fail: bool) {
        let mut fail_on = self.fail_on.write().await;
        if fail {
            fail_on.insert(call);
        } else {
            fail_on.remove(&call);
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn record(&self, call: StaffCall) -> Result<()> {
        self.calls.write().await.push(call);
        if self.fail_on.read().await.contains(&call) {
            return Err(StaffingError::Unavailable(format!("staff store {call:?}")));
        }
        Ok(())
    }

    async fn update_history<F>(&self, call: StaffCall, staff_id: i64, apply: F) -> Result<()>
    where
        F: FnOnce(&mut History) + Send,
    {
        self.record(call).await?;
        let mut rows = self.rows.write().await;
        let history = rows
            .get_mut(&staff_id)
            .ok_or_else(|| StaffingError::not_found("Staff", staff_id))?
            .history
            .as_mut()
            .ok_or_else(|| StaffingError::not_found("History", staff_id))?;
        apply(history);
        Ok(())
    }

    async fn update_staff<F>(&self, call: StaffCall, staff_id: i64, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Staff) + Send,
    {
        self.record(call).await?;
        let mut rows = self.rows.write().await;
        let staff = rows
            .get_mut(&staff_id)
            .ok_or_else(|| StaffingError::not_found("Staff", staff_id))?;
        apply(staff);
        Ok(())
    }
}

#[async_trait]
impl StaffStore for MemoryStaffStore {
    async fn create(
        &self,
        _ctx: &RequestContext,
        position_id: i64,
        manager_id: PersonId,
    ) -> Result<i64> {
        self.record(StaffCall::Create).await?;
        let id = self.staff_ids.next();
        self.rows.write().await.insert(
            id,
            Staff {
                id,
                manager_id,
                position_id,
                history: None,
            },
        );
        Ok(id)
    }

    async fn create_history(&self, _ctx: &RequestContext, history: NewHistory) -> Result<i64> {
        self.record(StaffCall::CreateHistory).await?;
        let mut rows = self.rows.write().await;
        let staff = rows
            .get_mut(&history.staff_id)
            .ok_or_else(|| StaffingError::not_found("Staff", history.staff_id))?;
        if staff.history.is_some() {
            return Err(StaffingError::AlreadyExists(format!(
                "Staff {} already has a history record",
                history.staff_id
            )));
        }

        let id = self.history_ids.next();
        staff.history = Some(History {
            id,
            staff_id: history.staff_id,
            person_id: history.person_id,
            mentor_id: history.mentor_id,
            created_on: history.created_on,
            employment_percentage: history.employment_percentage,
        });
        Ok(id)
    }

    async fn set_manager(
        &self,
        _ctx: &RequestContext,
        staff_id: i64,
        manager_id: PersonId,
    ) -> Result<()> {
        self.update_staff(StaffCall::SetManager, staff_id, |s| s.manager_id = manager_id)
            .await
    }

    async fn set_position(
        &self,
        _ctx: &RequestContext,
        staff_id: i64,
        position_id: i64,
    ) -> Result<()> {
        self.update_staff(StaffCall::SetPosition, staff_id, |s| s.position_id = position_id)
            .await
    }

    async fn set_date(
        &self,
        _ctx: &RequestContext,
        staff_id: i64,
        created_on: NaiveDate,
    ) -> Result<()> {
        self.update_history(StaffCall::SetDate, staff_id, |h| h.created_on = created_on)
            .await
    }

    async fn set_employment(
        &self,
        _ctx: &RequestContext,
        staff_id: i64,
        percentage: u8,
    ) -> Result<()> {
        self.update_history(StaffCall::SetEmployment, staff_id, |h| {
            h.employment_percentage = percentage
        })
        .await
    }

    async fn set_mentor(
        &self,
        _ctx: &RequestContext,
        staff_id: i64,
        mentor_id: Option<PersonId>,
    ) -> Result<()> {
        self.update_history(StaffCall::SetMentor, staff_id, |h| h.mentor_id = mentor_id)
            .await
    }

    async fn get_by_id(&self, _ctx: &RequestContext, id: i64) -> Result<Staff> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StaffingError::not_found("Staff", id))
    }

    async fn get_by_person(
        &self,
        _ctx: &RequestContext,
        person_id: PersonId,
    ) -> Result<RemoteStream<Staff>> {
        let staff: Vec<Staff> = self
            .rows
            .read()
            .await
            .values()
            .filter(|s| s.history.as_ref().map(|h| h.person_id) == Some(person_id))
            .cloned()
            .collect();
        Ok(futures::stream::iter(staff.into_iter().map(Ok)).boxed())
    }
}
