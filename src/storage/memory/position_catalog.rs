//! In-memory position catalog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::sync::RwLock;

use super::IdSequence;
use crate::error::{Result, StaffingError};
use crate::interfaces::{PositionCatalog, RemoteStream};
use crate::model::{Grade, GradeHistory, NewGrade, Position};
use crate::orchestration::RequestContext;

#[derive(Default)]
pub struct MemoryPositionCatalog {
    positions: RwLock<Vec<Position>>,
    position_ids: IdSequence,
    grade_ids: IdSequence,
    history_ids: IdSequence,
}

impl MemoryPositionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored positions.
    pub async fn positions(&self) -> Vec<Position> {
        self.positions.read().await.clone()
    }
}

#[async_trait]
impl PositionCatalog for MemoryPositionCatalog {
    async fn get_all(&self, _ctx: &RequestContext) -> Result<RemoteStream<Position>> {
        let positions = self.positions.read().await.clone();
        Ok(futures::stream::iter(positions.into_iter().map(Ok)).boxed())
    }

    async fn insert_position(
        &self,
        _ctx: &RequestContext,
        name: &str,
        grades: Vec<NewGrade>,
    ) -> Result<i64> {
        let mut positions = self.positions.write().await;
        if positions.iter().any(|p| p.name == name) {
            return Err(StaffingError::AlreadyExists(format!(
                "Position with name '{name}' already exists"
            )));
        }

        let grades = grades
            .into_iter()
            .map(|grade| Grade {
                id: self.grade_ids.next(),
                grade: grade.grade,
                history: vec![GradeHistory {
                    id: self.history_ids.next(),
                    created_on: grade.created_on,
                    value: grade.initial_salary,
                }],
            })
            .collect();

        let id = self.position_ids.next();
        positions.push(Position {
            id,
            name: name.to_string(),
            grades,
        });
        Ok(id)
    }

    async fn append_grade_history(
        &self,
        _ctx: &RequestContext,
        grade_id: i64,
        value: i64,
        created_on: DateTime<Utc>,
    ) -> Result<GradeHistory> {
        let mut positions = self.positions.write().await;
        let grade = positions
            .iter_mut()
            .flat_map(|p| p.grades.iter_mut())
            .find(|g| g.id == grade_id)
            .ok_or_else(|| StaffingError::not_found("Grade", grade_id))?;

        let entry = GradeHistory {
            id: self.history_ids.next(),
            created_on,
            value,
        };
        grade.history.push(entry.clone());
        Ok(entry)
    }
}
