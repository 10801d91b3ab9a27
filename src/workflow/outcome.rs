//! Terminal outcomes of one workflow invocation

use crate::cloud::types::StateReport;

/// Result of one reboot-and-verify run
///
/// Every variant carries enough captured state to reconstruct the
/// before/after picture in the response envelope. `Failed` covers any
/// remote-call error in the sequence; `MissingConfig` short-circuits
/// before any remote call is made.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Reboot issued and both status checks recovered within the budget
    Success {
        before: StateReport,
        after: StateReport,
    },

    /// Poll budget exhausted without a healthy reading. The after block is
    /// a best-effort diagnostic read and may be empty.
    TimedOut {
        before: StateReport,
        after: StateReport,
        details: String,
    },

    /// A remote call failed before or during the sequence. No after read
    /// is taken: either no state change was initiated, or the provider is
    /// already refusing reads.
    Failed { before: StateReport, error: String },

    /// No target instance configured; nothing was attempted
    MissingConfig { error: String },
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowOutcome::Success { .. })
    }

    /// Stable label for metrics and logs
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowOutcome::Success { .. } => "success",
            WorkflowOutcome::TimedOut { .. } => "timeout",
            WorkflowOutcome::Failed { .. } => "client_error",
            WorkflowOutcome::MissingConfig { .. } => "config_error",
        }
    }
}
