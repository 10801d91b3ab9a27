//! Control-plane client seam
//!
//! The workflow talks to the compute provider through this trait so the
//! orchestrator and poller can be exercised against recording mocks.
//! Pure request/response: no retry logic lives at this layer.

use crate::cloud::types::{InstanceSnapshot, StatusChecks};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlPlaneError {
    /// Transport or API failure; the provider message is preserved verbatim
    /// so it can surface in the response envelope.
    #[error("control-plane API error: {0}")]
    Api(String),

    /// The provider returned a response the client could not interpret
    /// (e.g. a describe with no matching instance record).
    #[error("malformed control-plane response: {0}")]
    Malformed(String),
}

/// Remote control-plane operations for a single compute instance
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Single remote read of instance metadata
    async fn describe_instance(&self, id: &str) -> Result<InstanceSnapshot, ControlPlaneError>;

    /// Single remote read of the instance's status checks
    ///
    /// Returns `StatusChecks::unknown()` when the provider has no status
    /// record for the instance yet (expected in the seconds right after a
    /// reboot is issued) rather than failing.
    async fn describe_status(&self, id: &str) -> Result<StatusChecks, ControlPlaneError>;

    /// Issue the reboot command
    ///
    /// Fire-and-forget: the provider acknowledges acceptance only, never
    /// completion. Fails if the command is rejected (bad id, permissions).
    async fn reboot(&self, id: &str) -> Result<(), ControlPlaneError>;
}
