//! Standalone harness: in-memory collaborators driven by a YAML script.
//!
//! ## Configuration
//! ```yaml
//! storage:
//!   type: memory
//!   seed_path: seed.yaml
//! standalone:
//!   script_path: script.yaml
//! timeouts:
//!   remote_call_ms: 2000
//! ```

pub mod runtime;
pub mod script;

pub use runtime::{Outcome, StandaloneRuntime, StepReport};
pub use script::{Script, ScriptCommand};
