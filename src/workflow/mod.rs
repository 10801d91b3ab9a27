//! The reboot-and-health-verification workflow
//!
//! - `poller` waits for both status checks to recover under a bounded budget
//! - `orchestrator` sequences snapshot -> reboot -> poll -> snapshot -> notify
//! - `outcome` is the terminal result the webhook gate renders

pub mod orchestrator;
pub mod outcome;
pub mod poller;

#[cfg(test)]
pub mod testing;

pub use orchestrator::{best_effort_report, run_reboot, WorkflowContext};
pub use outcome::WorkflowOutcome;
pub use poller::{wait_until_healthy, PollConfig, PollError};
