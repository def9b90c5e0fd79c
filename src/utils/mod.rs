//! Pure utility functions.
//!
//! These are stateless helpers used by the orchestrator and the ledgers.

pub mod bootstrap;
pub mod capacity;
pub mod clock;
pub mod ordering;
pub mod salary;
