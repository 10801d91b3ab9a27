//! Shared test doubles for the workflow
//!
//! Scriptable control-plane and notifier mocks that record every call, so
//! tests can assert both outcomes and the exact remote-call sequence.

use crate::cloud::control_plane::{ControlPlane, ControlPlaneError};
use crate::cloud::sns::{Notifier, NotifyError};
use crate::cloud::types::{CheckStatus, InstanceSnapshot, LifecycleState, StatusChecks};
use crate::config::Config;
use crate::server::metrics::create_metrics;
use crate::workflow::orchestrator::WorkflowContext;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn running_snapshot() -> InstanceSnapshot {
    InstanceSnapshot {
        state: LifecycleState::Running,
        instance_type: "t3.micro".to_string(),
        az: "us-east-1a".to_string(),
        launch_time: Some("2024-05-01T12:00:00+00:00".to_string()),
        private_ip: Some("10.0.0.5".to_string()),
        public_ip: Some("54.0.0.5".to_string()),
    }
}

pub fn healthy_checks() -> StatusChecks {
    StatusChecks {
        system: CheckStatus::Ok,
        instance: CheckStatus::Ok,
    }
}

pub fn impaired_checks() -> StatusChecks {
    StatusChecks {
        system: CheckStatus::Impaired,
        instance: CheckStatus::Ok,
    }
}

/// Scriptable control plane
///
/// Responses are queued per operation; an empty queue falls back to a
/// vanilla healthy/running answer, so tests only script the interesting
/// prefix of the call sequence.
#[derive(Default)]
pub struct MockControlPlane {
    describe_queue: Mutex<VecDeque<Result<InstanceSnapshot, ControlPlaneError>>>,
    status_queue: Mutex<VecDeque<Result<StatusChecks, ControlPlaneError>>>,
    reboot_error: Mutex<Option<String>>,
    pub describe_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub reboot_calls: AtomicUsize,
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_describe(&self, snapshot: InstanceSnapshot) {
        self.describe_queue.lock().unwrap().push_back(Ok(snapshot));
    }

    pub fn push_describe_error(&self, message: &str) {
        self.describe_queue
            .lock()
            .unwrap()
            .push_back(Err(ControlPlaneError::Api(message.to_string())));
    }

    pub fn push_status(&self, checks: StatusChecks) {
        self.status_queue.lock().unwrap().push_back(Ok(checks));
    }

    pub fn push_status_error(&self, message: &str) {
        self.status_queue
            .lock()
            .unwrap()
            .push_back(Err(ControlPlaneError::Api(message.to_string())));
    }

    pub fn fail_reboot(&self, message: &str) {
        *self.reboot_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn describe_call_count(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn status_call_count(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn reboot_call_count(&self) -> usize {
        self.reboot_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ControlPlane for MockControlPlane {
    async fn describe_instance(&self, _id: &str) -> Result<InstanceSnapshot, ControlPlaneError> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.describe_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(running_snapshot()))
    }

    async fn describe_status(&self, _id: &str) -> Result<StatusChecks, ControlPlaneError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(healthy_checks()))
    }

    async fn reboot(&self, _id: &str) -> Result<(), ControlPlaneError> {
        self.reboot_calls.fetch_add(1, Ordering::SeqCst);
        match self.reboot_error.lock().unwrap().as_ref() {
            Some(message) => Err(ControlPlaneError::Api(message.clone())),
            None => Ok(()),
        }
    }
}

/// Notifier recording published messages, optionally failing every publish
#[derive(Default)]
pub struct MockNotifier {
    fail: bool,
    attempts: AtomicUsize,
    published: Mutex<Vec<(String, String)>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Publish("simulated publish failure".to_string()));
        }
        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}

/// Config with a zero poll interval so polling tests run instantly
pub fn test_config(instance_id: Option<&str>) -> Config {
    Config {
        instance_id: instance_id.map(str::to_string),
        region: "us-east-1".to_string(),
        topic_arn: None,
        webhook_token: None,
        poll_interval: Duration::ZERO,
        poll_max_attempts: 60,
        port: 0,
    }
}

/// Workflow context wired to the given mocks
pub fn test_context(
    config: Config,
    control_plane: Arc<MockControlPlane>,
    notifier: Option<Arc<MockNotifier>>,
) -> WorkflowContext {
    WorkflowContext {
        config,
        control_plane,
        notifier: notifier.map(|n| n as Arc<dyn Notifier>),
        metrics: create_metrics().expect("create metrics"),
    }
}
