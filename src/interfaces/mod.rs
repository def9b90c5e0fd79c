//! Abstract contracts for the services the staffing core consumes.
//!
//! These traits define the remote interfaces for:
//! - Person directory (identity existence)
//! - Position catalog (positions, grades, salary history)
//! - Staff store (staff rows and their history)
//! - Team store (teams and membership rows)
//!
//! Every call receives the caller's [`RequestContext`](crate::orchestration::RequestContext)
//! unchanged. Streaming reads return a [`BoxStream`](futures::stream::BoxStream)
//! which callers buffer to completion before validating.

pub mod person_directory;
pub mod position_catalog;
pub mod staff_store;
pub mod team_store;

pub use person_directory::PersonDirectory;
pub use position_catalog::PositionCatalog;
pub use staff_store::StaffStore;
pub use team_store::TeamStore;

use futures::stream::BoxStream;

use crate::error::Result;

/// Stream of items from a remote read.
pub type RemoteStream<T> = BoxStream<'static, Result<T>>;
