//! Command script format.
//!
//! ```yaml
//! commands:
//!   - op: create_team
//!     name: Core
//!   - op: add_member
//!     team_id: 1
//!     person_id: 9
//!     employment_percentage: 60
//!     start_work: 2024-01-01
//!   - op: create_employment
//!     person_id: 1
//!     manager_id: 2
//!     position_id: 1
//!     start_date: 2024-01-01
//!     employment_percentage: 100
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::model::{NewGrade, PersonId};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Script {
    pub commands: Vec<ScriptCommand>,
}

impl Script {
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// One operation against the staffing services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    CreateEmployment {
        person_id: PersonId,
        manager_id: PersonId,
        #[serde(default)]
        mentor_id: Option<PersonId>,
        position_id: i64,
        start_date: NaiveDate,
        employment_percentage: u8,
    },
    UpdateEmployment {
        staff_id: i64,
        manager_id: PersonId,
        #[serde(default)]
        mentor_id: Option<PersonId>,
        position_id: i64,
        start_date: NaiveDate,
        employment_percentage: u8,
    },
    CreatePosition {
        name: String,
        grades: Vec<NewGrade>,
    },
    SetGradeSalary {
        grade_id: i64,
        salary: i64,
        #[serde(default)]
        effective_on: Option<DateTime<Utc>>,
    },
    CreateTeam {
        name: String,
    },
    AddMember {
        team_id: i64,
        person_id: PersonId,
        employment_percentage: u8,
        start_work: NaiveDate,
    },
    UpdateMemberPercentage {
        team_id: i64,
        person_id: PersonId,
        employment_percentage: u8,
    },
    SetEndWork {
        team_id: i64,
        person_id: PersonId,
        end_work: NaiveDate,
    },
}

impl ScriptCommand {
    pub fn op(&self) -> &'static str {
        match self {
            ScriptCommand::CreateEmployment { .. } => "create_employment",
            ScriptCommand::UpdateEmployment { .. } => "update_employment",
            ScriptCommand::CreatePosition { .. } => "create_position",
            ScriptCommand::SetGradeSalary { .. } => "set_grade_salary",
            ScriptCommand::CreateTeam { .. } => "create_team",
            ScriptCommand::AddMember { .. } => "add_member",
            ScriptCommand::UpdateMemberPercentage { .. } => "update_member_percentage",
            ScriptCommand::SetEndWork { .. } => "set_end_work",
        }
    }
}
