//! Prometheus metrics for the reboot workflow
//!
//! Exposes service activity metrics:
//! - Workflow invocation counts and durations by outcome
//! - Notification delivery results

use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Workflow metrics registry
///
/// Thread-safe container for all Prometheus metrics.
/// Clone is cheap (Arc internally).
#[derive(Clone)]
pub struct WorkflowMetrics {
    registry: Registry,
    /// Total workflow invocations by outcome (success, timeout,
    /// client_error, config_error, unauthorized)
    pub workflows_total: IntCounterVec,
    /// Workflow duration in seconds; a run can legitimately block for the
    /// full poll budget, so the buckets reach into minutes
    pub workflow_duration_seconds: HistogramVec,
    /// Notification publishes by result (success, error)
    pub notifications_total: IntCounterVec,
}

impl WorkflowMetrics {
    /// Create a new metrics registry with all kunto metrics
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let workflows_total = IntCounterVec::new(
            Opts::new(
                "kunto_workflows_total",
                "Total number of reboot workflow invocations",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(workflows_total.clone()))?;

        let workflow_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "kunto_workflow_duration_seconds",
                "Duration of reboot workflow invocations in seconds",
            )
            .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(workflow_duration_seconds.clone()))?;

        let notifications_total = IntCounterVec::new(
            Opts::new(
                "kunto_notifications_total",
                "Total number of outcome notifications by result",
            ),
            &["result"],
        )?;
        registry.register(Box::new(notifications_total.clone()))?;

        Ok(Self {
            registry,
            workflows_total,
            workflow_duration_seconds,
            notifications_total,
        })
    }

    /// Record one finished workflow invocation
    pub fn record_workflow(&self, outcome: &str, duration_secs: f64) {
        self.workflows_total.with_label_values(&[outcome]).inc();
        self.workflow_duration_seconds
            .with_label_values(&[outcome])
            .observe(duration_secs);
    }

    /// Record a rejected (unauthorized) trigger
    pub fn record_unauthorized(&self) {
        self.workflows_total
            .with_label_values(&["unauthorized"])
            .inc();
    }

    /// Record a notification publish attempt
    pub fn record_notification(&self, result: &str) {
        self.notifications_total.with_label_values(&[result]).inc();
    }

    /// Encode all metrics to Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("Failed to encode metrics as UTF-8: {}", e))
        })
    }
}

/// Shared metrics handle for use across the service
pub type SharedMetrics = Arc<WorkflowMetrics>;

/// Create a new shared metrics instance
pub fn create_metrics() -> Result<SharedMetrics, prometheus::Error> {
    Ok(Arc::new(WorkflowMetrics::new()?))
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
