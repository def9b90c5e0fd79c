//! Orchestration of multi-service employment workflows.
//!
//! Workflows validate every cross-service reference with a remote call
//! before issuing any write, then write in a fixed order with no
//! compensation on partial failure.

pub mod context;
pub mod employment;

pub use context::{CancelHandle, CancelSignal, RequestContext};
pub use employment::{CreateEmployment, EmploymentOrchestrator, FieldChange, UpdateEmployment};
