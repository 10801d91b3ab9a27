//! Health poller: bounded fixed-interval status polling
//!
//! Deliberately no backoff: the target operation has a known, roughly
//! bounded recovery time, so a fixed interval with an attempt cap is the
//! whole contract. Polls run sequentially and never early-exit on an
//! impaired reading, since transient impairment right after a reboot is
//! expected and self-resolving within the budget.

use crate::cloud::control_plane::{ControlPlane, ControlPlaneError};
use crate::cloud::types::StatusChecks;
use crate::config::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_MAX_ATTEMPTS};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Poll interval and attempt budget for one invocation
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Fixed delay before each status read
    pub interval: Duration,
    /// Maximum number of status reads before declaring timeout
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    /// Attempt budget exhausted without a healthy reading
    #[error("status checks not ok after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// A status read failed outright; classified by the orchestrator as a
    /// client error, not a timeout
    #[error(transparent)]
    Api(#[from] ControlPlaneError),
}

/// Poll until both status checks report ok, or the budget runs out
///
/// Each attempt is a blocking wait for `interval` followed by one status
/// read. The wait comes first: the seconds right after a reboot command
/// report no status record at all, so an immediate read buys nothing.
///
/// Returns the first healthy reading.
pub async fn wait_until_healthy(
    control_plane: &dyn ControlPlane,
    instance_id: &str,
    config: &PollConfig,
) -> Result<StatusChecks, PollError> {
    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(config.interval).await;

        let checks = control_plane.describe_status(instance_id).await?;

        if checks.is_healthy() {
            debug!(
                instance = %instance_id,
                attempt = attempt,
                "Status checks passed"
            );
            return Ok(checks);
        }

        debug!(
            instance = %instance_id,
            attempt = attempt,
            max_attempts = config.max_attempts,
            system = ?checks.system,
            instance_check = ?checks.instance,
            "Status checks not ok yet"
        );
    }

    warn!(
        instance = %instance_id,
        attempts = config.max_attempts,
        "Poll budget exhausted without healthy status"
    );

    Err(PollError::Timeout {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
