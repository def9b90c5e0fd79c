//! In-memory collaborator stores.
//!
//! Each store enforces the uniqueness and existence backstops a real
//! backing service would apply at write time.

mod person_directory;
mod position_catalog;
mod staff_store;
mod team_store;

pub use person_directory::MemoryPersonDirectory;
pub use position_catalog::MemoryPositionCatalog;
pub use staff_store::{MemoryStaffStore, StaffCall};
pub use team_store::MemoryTeamStore;

use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic id generator starting at 1.
#[derive(Debug, Default)]
pub(crate) struct IdSequence(AtomicI64);

impl IdSequence {
    pub(crate) fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[cfg(test)]
mod tests;
