//! Remote-call and service behavior configuration.

use std::time::Duration;

use serde::Deserialize;

/// Bounds applied to every remote call a workflow issues.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-call timeout in milliseconds. 0 disables the bound.
    pub remote_call_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            remote_call_ms: 5_000,
        }
    }
}

impl TimeoutConfig {
    pub fn remote_call(&self) -> Option<Duration> {
        (self.remote_call_ms > 0).then(|| Duration::from_millis(self.remote_call_ms))
    }
}

/// Team ledger configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamLedgerConfig {
    /// Serialize the capacity check and the write per member.
    ///
    /// Off by default: concurrent writes for one member are not serialized
    /// and can jointly exceed capacity. Only protects writers in this process.
    pub serialize_capacity_checks: bool,
}

/// Standalone harness configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StandaloneConfig {
    /// YAML command script executed by `staffing-standalone`.
    pub script_path: Option<String>,
}
