pub mod cloud;
pub mod config;
pub mod server;
pub mod workflow;

// Re-export for main.rs and integration tests
pub use crate::config::Config;
pub use crate::workflow::{run_reboot, WorkflowContext, WorkflowOutcome};
