//! Collaborator store wiring.
//!
//! Builds the person directory, position catalog, staff store and team
//! store selected by configuration, and applies the optional seed file.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageConfig, StorageType};
use crate::interfaces::{PersonDirectory, PositionCatalog, StaffStore, TeamStore};
use crate::orchestration::RequestContext;

pub mod memory;
pub mod seed;

pub use memory::{
    MemoryPersonDirectory, MemoryPositionCatalog, MemoryStaffStore, MemoryTeamStore, StaffCall,
};
pub use seed::Seed;

/// Handles to every collaborator the staffing core consumes.
#[derive(Clone)]
pub struct Collaborators {
    pub people: Arc<dyn PersonDirectory>,
    pub positions: Arc<dyn PositionCatalog>,
    pub staff: Arc<dyn StaffStore>,
    pub teams: Arc<dyn TeamStore>,
}

/// Initialize collaborator stores based on configuration.
pub async fn init_storage(
    config: &StorageConfig,
) -> Result<Collaborators, Box<dyn std::error::Error>> {
    match config.storage_type {
        StorageType::Memory => {
            info!("Storage: in-memory collaborators");
            let people = Arc::new(MemoryPersonDirectory::new());
            let positions = Arc::new(MemoryPositionCatalog::new());
            let staff = Arc::new(MemoryStaffStore::new());
            let teams = Arc::new(MemoryTeamStore::new());

            if let Some(path) = config.seed_path.as_deref() {
                let seed = Seed::from_file(path)?;
                let ctx = RequestContext::new();
                seed.apply(&ctx, &people, positions.as_ref(), teams.as_ref())
                    .await?;
                info!(
                    seed = %path,
                    people = seed.people.len(),
                    positions = seed.positions.len(),
                    teams = seed.teams.len(),
                    "Seed applied"
                );
            }

            Ok(Collaborators {
                people,
                positions,
                staff,
                teams,
            })
        }
    }
}
