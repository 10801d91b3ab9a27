//! Webhook gate: inbound trigger authorization and response envelope
//!
//! Authorizes the trigger against the configured shared secret before any
//! remote call, invokes the orchestrator, and renders the outcome into a
//! transport-level response. Every path leaves with a structured JSON body.

use crate::workflow::{run_reboot, WorkflowOutcome};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::warn;

use crate::server::AppState;

/// Header carrying the shared secret
pub const TOKEN_HEADER: &str = "x-webhook-token";

/// `POST /reboot` handler
pub async fn reboot_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    // Auth check runs only when a token is configured; an empty configured
    // value was already normalized to unset at load time.
    if let Some(expected) = &state.workflow.config.webhook_token {
        let presented = headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if presented != expected {
            warn!("Rejected trigger: webhook token mismatch");
            state.metrics.record_unauthorized();
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "ok": false, "error": "Unauthorized" })),
            );
        }
    }

    let started = Instant::now();
    let outcome = run_reboot(&state.workflow).await;
    state
        .metrics
        .record_workflow(outcome.label(), started.elapsed().as_secs_f64());

    render_outcome(&state, outcome)
}

/// Render a workflow outcome into the response envelope
///
/// Status mapping: 200 success, 504 timeout, 500 client/config error.
fn render_outcome(state: &AppState, outcome: WorkflowOutcome) -> (StatusCode, Json<Value>) {
    let config = &state.workflow.config;
    let region = &config.region;
    let instance_id = config.instance_id.as_deref().unwrap_or_default();

    match outcome {
        WorkflowOutcome::Success { before, after } => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "action": "reboot",
                "region": region,
                "instance_id": instance_id,
                "before": before,
                "after": after,
            })),
        ),
        WorkflowOutcome::TimedOut {
            before,
            after,
            details,
        } => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(json!({
                "ok": false,
                "error": "Timed out waiting for instance status checks",
                "region": region,
                "instance_id": instance_id,
                "before": before,
                "after": after,
                "details": details,
            })),
        ),
        WorkflowOutcome::Failed { before, error } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "ok": false,
                "error": error,
                "region": region,
                "instance_id": instance_id,
                "before": before,
            })),
        ),
        WorkflowOutcome::MissingConfig { error } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": error })),
        ),
    }
}

#[cfg(test)]
#[path = "webhook_test.rs"]
mod tests;
