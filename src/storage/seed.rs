//! Startup seed for in-memory collaborators.
//!
//! ```yaml
//! people: [1, 2, 3]
//! positions:
//!   - name: Engineer
//!     grades:
//!       - grade: 1
//!         initial_salary: 1000
//!         created_on: 2024-01-01T00:00:00Z
//! teams: [Core, Platform]
//! ```

use serde::Deserialize;

use super::memory::MemoryPersonDirectory;
use crate::error::Result;
use crate::interfaces::{PositionCatalog, TeamStore};
use crate::model::{NewGrade, PersonId};
use crate::orchestration::RequestContext;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub people: Vec<PersonId>,
    pub positions: Vec<SeedPosition>,
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedPosition {
    pub name: String,
    pub grades: Vec<NewGrade>,
}

impl Seed {
    pub fn from_file(path: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load the seed into the stores. Ids are assigned in file order.
    pub async fn apply(
        &self,
        ctx: &RequestContext,
        people: &MemoryPersonDirectory,
        positions: &dyn PositionCatalog,
        teams: &dyn TeamStore,
    ) -> Result<()> {
        for id in &self.people {
            people.register(*id).await;
        }
        for position in &self.positions {
            positions
                .insert_position(ctx, &position.name, position.grades.clone())
                .await?;
        }
        for team in &self.teams {
            teams.create_team(ctx, team).await?;
        }
        Ok(())
    }
}
