//! staffing-standalone: in-process staffing services driven by a script
//!
//! Builds in-memory collaborators from the configured seed file, then
//! executes the configured command script and logs the outward status of
//! every step.
//!
//! ## Usage
//! ```text
//! staffing-standalone [config.yaml]
//! ```

use std::sync::Arc;

use tracing::{error, info};

use staffing::config::Config;
use staffing::standalone::{Script, StandaloneRuntime};
use staffing::storage::init_storage;
use staffing::utils::bootstrap::init_tracing;
use staffing::utils::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    let collaborators = init_storage(&config.storage).await?;
    let runtime = StandaloneRuntime::new(&collaborators, &config, Arc::new(SystemClock));

    let Some(script_path) = config.standalone.script_path.as_deref() else {
        info!("No standalone.script_path configured; nothing to run");
        return Ok(());
    };
    let script = Script::from_file(script_path).map_err(|e| {
        error!(script = %script_path, error = %e, "Failed to load script");
        e
    })?;

    let reports = runtime.run(&script).await;
    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    info!(steps = reports.len(), failed, "Script finished");
    Ok(())
}
