//! Staffing services layered over the collaborator stores.

pub mod position_registry;
pub mod team_ledger;

pub use position_registry::{CurrentSalary, PositionRegistry};
pub use team_ledger::TeamLedger;
