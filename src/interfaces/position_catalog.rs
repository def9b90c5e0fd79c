//! Position catalog interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RemoteStream;
use crate::error::Result;
use crate::model::{GradeHistory, NewGrade, Position};
use crate::orchestration::RequestContext;

/// Owner of positions, their grades and each grade's salary history.
///
/// Implementations:
/// - `MemoryPositionCatalog`: in-process storage
#[async_trait]
pub trait PositionCatalog: Send + Sync {
    /// Every position with its grades and their full history.
    async fn get_all(&self, ctx: &RequestContext) -> Result<RemoteStream<Position>>;

    /// Insert a position with one initial history entry per grade.
    ///
    /// Fails with `AlreadyExists` when the name is taken.
    async fn insert_position(
        &self,
        ctx: &RequestContext,
        name: &str,
        grades: Vec<NewGrade>,
    ) -> Result<i64>;

    /// Append a salary version to a grade. Existing entries are never touched.
    async fn append_grade_history(
        &self,
        ctx: &RequestContext,
        grade_id: i64,
        value: i64,
        created_on: DateTime<Utc>,
    ) -> Result<GradeHistory>;
}
