//! In-memory person directory.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StaffingError};
use crate::interfaces::PersonDirectory;
use crate::model::PersonId;
use crate::orchestration::RequestContext;

#[derive(Default)]
pub struct MemoryPersonDirectory {
    people: RwLock<HashSet<PersonId>>,
    unavailable: RwLock<bool>,
}

impl MemoryPersonDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, id: PersonId) {
        self.people.write().await.insert(id);
    }

    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }
}

#[async_trait]
impl PersonDirectory for MemoryPersonDirectory {
    async fn exists(&self, _ctx: &RequestContext, id: PersonId) -> Result<bool> {
        if *self.unavailable.read().await {
            return Err(StaffingError::Unavailable("person directory".to_string()));
        }
        Ok(self.people.read().await.contains(&id))
    }
}
