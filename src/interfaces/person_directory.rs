//! Person directory interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::PersonId;
use crate::orchestration::RequestContext;

/// Owner of person identity. The staffing core only asks whether a person exists.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Check whether `id` names a known person.
    ///
    /// Remote implementations model this as "get by id" and translate a
    /// not-found response into `Ok(false)`.
    async fn exists(&self, ctx: &RequestContext, id: PersonId) -> Result<bool>;
}
