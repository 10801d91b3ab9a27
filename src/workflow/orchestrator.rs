//! Reboot orchestrator: snapshot -> reboot -> poll -> snapshot -> notify
//!
//! Owns the sequencing and failure classification. One invocation is one
//! sequential pass with no shared mutable state; the only suspension point
//! is the poller's interval wait.

use crate::cloud::control_plane::ControlPlane;
use crate::cloud::sns::Notifier;
use crate::cloud::types::StateReport;
use crate::config::Config;
use crate::server::metrics::SharedMetrics;
use crate::workflow::outcome::WorkflowOutcome;
use crate::workflow::poller::{wait_until_healthy, PollConfig, PollError};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Everything one invocation needs, built once at startup and never
/// mutated mid-flight
pub struct WorkflowContext {
    pub config: Config,
    pub control_plane: Arc<dyn ControlPlane>,
    /// Absent when no notification topic is configured; the notify step is
    /// then skipped entirely
    pub notifier: Option<Arc<dyn Notifier>>,
    pub metrics: SharedMetrics,
}

/// Run the reboot-and-verify workflow to one of its terminal states
///
/// Failure classification:
/// - any remote-call error before or during the sequence -> `Failed`, and
///   no reboot is issued unless the before snapshot succeeded first
/// - poll budget exhaustion -> `TimedOut`, still with a best-effort
///   diagnostic after read
/// - missing target instance id -> `MissingConfig`, zero remote calls
pub async fn run_reboot(ctx: &WorkflowContext) -> WorkflowOutcome {
    let Some(instance_id) = ctx.config.instance_id.as_deref() else {
        error!("No target instance configured");
        return WorkflowOutcome::MissingConfig {
            error: "Missing INSTANCE_ID".to_string(),
        };
    };

    let invocation = Uuid::new_v4();
    info!(
        invocation = %invocation,
        instance = %instance_id,
        region = %ctx.config.region,
        "Starting reboot workflow"
    );

    // Before snapshot. A failure here aborts with no reboot attempted: a
    // destructive action must not be issued when the precondition cannot
    // even be established.
    let describe = match ctx.control_plane.describe_instance(instance_id).await {
        Ok(d) => d,
        Err(e) => {
            error!(invocation = %invocation, error = %e, "Before-snapshot describe failed");
            return WorkflowOutcome::Failed {
                before: StateReport::empty(),
                error: e.to_string(),
            };
        }
    };
    let checks = match ctx.control_plane.describe_status(instance_id).await {
        Ok(c) => c,
        Err(e) => {
            error!(invocation = %invocation, error = %e, "Before-snapshot status read failed");
            return WorkflowOutcome::Failed {
                before: StateReport {
                    describe: Some(describe),
                    checks: None,
                },
                error: e.to_string(),
            };
        }
    };
    let before = StateReport::new(describe, checks);

    info!(
        invocation = %invocation,
        instance = %instance_id,
        state = ?before.describe.as_ref().map(|d| d.state),
        "Issuing reboot"
    );

    if let Err(e) = ctx.control_plane.reboot(instance_id).await {
        error!(invocation = %invocation, error = %e, "Reboot command rejected");
        return WorkflowOutcome::Failed {
            before,
            error: e.to_string(),
        };
    }

    let poll_config = PollConfig {
        interval: ctx.config.poll_interval,
        max_attempts: ctx.config.poll_max_attempts,
    };

    match wait_until_healthy(ctx.control_plane.as_ref(), instance_id, &poll_config).await {
        Ok(_) => {
            // Reboot and health verification already succeeded; a read
            // glitch here is diagnostic loss, not workflow failure, so the
            // after block degrades to empty instead of flipping the outcome.
            let after = best_effort_report(ctx.control_plane.as_ref(), instance_id).await;

            notify_success(ctx, instance_id).await;

            info!(
                invocation = %invocation,
                instance = %instance_id,
                "Reboot workflow succeeded"
            );

            WorkflowOutcome::Success { before, after }
        }
        Err(PollError::Timeout { attempts }) => {
            let after = best_effort_report(ctx.control_plane.as_ref(), instance_id).await;

            warn!(
                invocation = %invocation,
                instance = %instance_id,
                attempts = attempts,
                "Reboot workflow timed out waiting for healthy status"
            );

            WorkflowOutcome::TimedOut {
                before,
                after,
                details: format!(
                    "instance {} did not pass status checks within {} attempts",
                    instance_id, attempts
                ),
            }
        }
        Err(PollError::Api(e)) => {
            error!(invocation = %invocation, error = %e, "Status polling failed");
            WorkflowOutcome::Failed {
                before,
                error: e.to_string(),
            }
        }
    }
}

/// Attempt a full state read, degrading any failure to an empty half
///
/// Used for the after snapshot on the success and timeout paths: the
/// degradation is explicit in the return type, and a secondary failure
/// here can never escalate past this boundary.
pub async fn best_effort_report(control_plane: &dyn ControlPlane, instance_id: &str) -> StateReport {
    let describe = match control_plane.describe_instance(instance_id).await {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(instance = %instance_id, error = %e, "Best-effort describe failed");
            None
        }
    };

    let checks = match control_plane.describe_status(instance_id).await {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(instance = %instance_id, error = %e, "Best-effort status read failed");
            None
        }
    };

    StateReport { describe, checks }
}

/// Publish the success notification, best-effort and never retried
///
/// Skipped when no topic is configured. An error here must never alter or
/// suppress the successful outcome, so it is logged and dropped.
async fn notify_success(ctx: &WorkflowContext, instance_id: &str) {
    let Some(notifier) = &ctx.notifier else {
        return;
    };

    let subject = "EC2 reboot: status checks OK";
    let message = format!(
        "EC2 {} rebooted and passed status checks in {}.",
        instance_id, ctx.config.region
    );

    match notifier.publish(subject, &message).await {
        Ok(()) => {
            ctx.metrics.record_notification("success");
        }
        Err(e) => {
            warn!(instance = %instance_id, error = %e, "Notification failed (ignored)");
            ctx.metrics.record_notification("error");
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
