//! Position registry: positions, grades and append-only salary history.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use tracing::info;

use crate::error::{Result, StaffingError};
use crate::interfaces::PositionCatalog;
use crate::model::{GradeHistory, NewGrade, Position};
use crate::orchestration::RequestContext;
use crate::utils::clock::Clock;
use crate::utils::salary::current_entry;

/// Salary in effect for one grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSalary {
    pub position_id: i64,
    pub position_name: String,
    pub grade_id: i64,
    pub grade: i32,
    /// Id of the resolved history entry. Staff records reference positions by it.
    pub history_id: i64,
    pub salary: i64,
}

pub struct PositionRegistry {
    catalog: Arc<dyn PositionCatalog>,
    clock: Arc<dyn Clock>,
}

impl PositionRegistry {
    pub fn new(catalog: Arc<dyn PositionCatalog>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    /// Create a position with at least one grade, each with an initial salary.
    #[tracing::instrument(skip(self, ctx, grades), fields(correlation_id = %ctx.correlation_id(), grades = grades.len()))]
    pub async fn create_position(
        &self,
        ctx: &RequestContext,
        name: &str,
        grades: Vec<NewGrade>,
    ) -> Result<i64> {
        let name = name.trim();
        validate_new_position(name, &grades)?;

        let existing = self.get_all(ctx).await?;
        if existing.iter().any(|p| p.name == name) {
            return Err(StaffingError::AlreadyExists(format!(
                "Position with name '{name}' already exists"
            )));
        }

        let id = ctx
            .call(
                "position_catalog.insert_position",
                self.catalog.insert_position(ctx, name, grades),
            )
            .await?;
        info!(position_id = id, "Position created");
        Ok(id)
    }

    /// Append a salary version to a grade, effective at `effective_on` or now.
    #[tracing::instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id()))]
    pub async fn set_grade_salary(
        &self,
        ctx: &RequestContext,
        grade_id: i64,
        salary: i64,
        effective_on: Option<DateTime<Utc>>,
    ) -> Result<GradeHistory> {
        if salary < 0 {
            return Err(StaffingError::BadRequest(format!(
                "Salary must not be negative, got {salary}"
            )));
        }
        let created_on = effective_on.unwrap_or_else(|| self.clock.now());
        let entry = ctx
            .call(
                "position_catalog.append_grade_history",
                self.catalog
                    .append_grade_history(ctx, grade_id, salary, created_on),
            )
            .await?;
        info!(history_id = entry.id, "Grade salary appended");
        Ok(entry)
    }

    /// Every position with grades and history, fully buffered.
    pub async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Position>> {
        ctx.call("position_catalog.get_all", async {
            self.catalog.get_all(ctx).await?.try_collect().await
        })
        .await
    }

    /// Current salary of every grade. Grades with only future entries are omitted.
    pub async fn current_salaries(&self, ctx: &RequestContext) -> Result<Vec<CurrentSalary>> {
        let now = self.clock.now();
        let positions = self.get_all(ctx).await?;
        Ok(positions
            .iter()
            .flat_map(|position| {
                position.grades.iter().filter_map(move |grade| {
                    current_entry(&grade.history, now).map(|entry| CurrentSalary {
                        position_id: position.id,
                        position_name: position.name.clone(),
                        grade_id: grade.id,
                        grade: grade.grade,
                        history_id: entry.id,
                        salary: entry.value,
                    })
                })
            })
            .collect())
    }
}

fn validate_new_position(name: &str, grades: &[NewGrade]) -> Result<()> {
    if name.is_empty() {
        return Err(StaffingError::BadRequest(
            "Position name must not be empty".to_string(),
        ));
    }
    if grades.is_empty() {
        return Err(StaffingError::BadRequest(format!(
            "Position '{name}' must have at least one grade"
        )));
    }
    let mut seen = HashSet::new();
    for grade in grades {
        if !seen.insert(grade.grade) {
            return Err(StaffingError::BadRequest(format!(
                "Grade {} listed more than once",
                grade.grade
            )));
        }
        if grade.initial_salary < 0 {
            return Err(StaffingError::BadRequest(format!(
                "Grade {} has a negative initial salary",
                grade.grade
            )));
        }
    }
    Ok(())
}
