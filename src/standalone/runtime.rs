//! Executes scripts against the orchestrator, the team ledger and the
//! position registry.

use std::sync::Arc;
use std::time::Duration;

use tonic::Code;
use tracing::{info, warn};

use super::script::{Script, ScriptCommand};
use crate::config::Config;
use crate::error::Result;
use crate::model::GradeHistory;
use crate::orchestration::{
    CreateEmployment, EmploymentOrchestrator, RequestContext, UpdateEmployment,
};
use crate::services::{PositionRegistry, TeamLedger};
use crate::storage::Collaborators;
use crate::utils::clock::Clock;

/// Successful result of one script step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(i64),
    SalaryAppended(GradeHistory),
    Done,
}

/// Result of one script step with its outward status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    pub code: Code,
    pub result: Result<Outcome>,
}

pub struct StandaloneRuntime {
    orchestrator: EmploymentOrchestrator,
    ledger: TeamLedger,
    registry: PositionRegistry,
    call_timeout: Option<Duration>,
}

impl StandaloneRuntime {
    pub fn new(collaborators: &Collaborators, config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator: EmploymentOrchestrator::from_collaborators(collaborators, clock.clone()),
            ledger: TeamLedger::with_config(
                collaborators.teams.clone(),
                clock.clone(),
                &config.team_ledger,
            ),
            registry: PositionRegistry::new(collaborators.positions.clone(), clock),
            call_timeout: config.timeouts.remote_call(),
        }
    }

    fn context(&self) -> RequestContext {
        match self.call_timeout {
            Some(limit) => RequestContext::new().with_call_timeout(limit),
            None => RequestContext::new(),
        }
    }

    /// Execute one command in a fresh request context.
    pub async fn execute(&self, command: ScriptCommand) -> Result<Outcome> {
        let ctx = self.context();
        match command {
            ScriptCommand::CreateEmployment {
                person_id,
                manager_id,
                mentor_id,
                position_id,
                start_date,
                employment_percentage,
            } => {
                let request = CreateEmployment {
                    person_id,
                    manager_id,
                    mentor_id,
                    position_id,
                    start_date,
                    employment_percentage,
                };
                self.orchestrator
                    .create_employment(&ctx, request)
                    .await
                    .map(Outcome::Created)
            }
            ScriptCommand::UpdateEmployment {
                staff_id,
                manager_id,
                mentor_id,
                position_id,
                start_date,
                employment_percentage,
            } => {
                let request = UpdateEmployment {
                    staff_id,
                    manager_id,
                    mentor_id,
                    position_id,
                    start_date,
                    employment_percentage,
                };
                self.orchestrator.update_employment(&ctx, request).await?;
                Ok(Outcome::Done)
            }
            ScriptCommand::CreatePosition { name, grades } => self
                .registry
                .create_position(&ctx, &name, grades)
                .await
                .map(Outcome::Created),
            ScriptCommand::SetGradeSalary {
                grade_id,
                salary,
                effective_on,
            } => self
                .registry
                .set_grade_salary(&ctx, grade_id, salary, effective_on)
                .await
                .map(Outcome::SalaryAppended),
            ScriptCommand::CreateTeam { name } => self
                .ledger
                .create_team(&ctx, &name)
                .await
                .map(Outcome::Created),
            ScriptCommand::AddMember {
                team_id,
                person_id,
                employment_percentage,
                start_work,
            } => self
                .ledger
                .add_member(&ctx, team_id, person_id, employment_percentage, start_work)
                .await
                .map(Outcome::Created),
            ScriptCommand::UpdateMemberPercentage {
                team_id,
                person_id,
                employment_percentage,
            } => {
                self.ledger
                    .update_employment_percentage(&ctx, team_id, person_id, employment_percentage)
                    .await?;
                Ok(Outcome::Done)
            }
            ScriptCommand::SetEndWork {
                team_id,
                person_id,
                end_work,
            } => {
                self.ledger
                    .set_end_work(&ctx, team_id, person_id, end_work)
                    .await?;
                Ok(Outcome::Done)
            }
        }
    }

    /// Run every command in order. A failed step is reported and the run continues.
    pub async fn run(&self, script: &Script) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(script.commands.len());
        for (index, command) in script.commands.iter().enumerate() {
            let op = command.op();
            let result = self.execute(command.clone()).await;
            let code = match &result {
                Ok(outcome) => {
                    info!(index, op, outcome = ?outcome, "Step succeeded");
                    Code::Ok
                }
                Err(e) => {
                    let code = tonic::Status::from(e.clone()).code();
                    warn!(index, op, code = ?code, error = %e, "Step failed");
                    code
                }
            };
            reports.push(StepReport {
                index,
                op,
                code,
                result,
            });
        }
        reports
    }
}
