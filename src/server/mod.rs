//! HTTP surface for the service
//!
//! - `POST /reboot` - webhook-triggered reboot workflow
//! - `GET /healthz` - liveness probe
//! - `GET /readyz` - readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod health;
pub mod metrics;
pub mod webhook;

use crate::workflow::WorkflowContext;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub use health::ReadinessState;
pub use metrics::{create_metrics, SharedMetrics, WorkflowMetrics};

/// Shared state for all routes
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<WorkflowContext>,
    pub readiness: ReadinessState,
    pub metrics: SharedMetrics,
}

/// Build the service router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/reboot", post(webhook::reboot_webhook))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .with_state(state)
}

/// Run the HTTP server on the specified port
///
/// Serves the webhook gate and the health/metrics endpoints until shut down.
pub async fn run_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - server is actually listening
    info!(port = %port, "Server listening");

    axum::serve(listener, app)
        .await
        .map_err(std::io::Error::other)
}
