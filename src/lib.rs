//! Staffing - employment-lifecycle orchestration
//!
//! Coordinates staffing records whose references live in separate
//! services: a person directory, a position catalog, a staff store and a
//! team store. Cross-service references are checked before any write,
//! partial updates write only changed fields, and the ordering and
//! capacity invariants are enforced without a shared transaction.

pub mod config;
pub mod error;
pub mod interfaces;
pub mod model;
pub mod orchestration;
pub mod services;
pub mod standalone;
pub mod storage;
pub mod utils;

pub use error::{ErrorKind, Result, StaffingError};
