//! EC2 implementation of the control-plane client

use crate::cloud::control_plane::{ControlPlane, ControlPlaneError};
use crate::cloud::types::{CheckStatus, InstanceSnapshot, LifecycleState, StatusChecks};
use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::Client;
use tracing::debug;

/// Control-plane client backed by the EC2 API
pub struct Ec2ControlPlane {
    client: Client,
}

impl Ec2ControlPlane {
    /// Create a client from a pre-loaded AWS config
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ControlPlane for Ec2ControlPlane {
    async fn describe_instance(&self, id: &str) -> Result<InstanceSnapshot, ControlPlaneError> {
        let response = self
            .client
            .describe_instances()
            .instance_ids(id)
            .send()
            .await
            .map_err(|e| ControlPlaneError::Api(DisplayErrorContext(e).to_string()))?;

        let instance = response
            .reservations()
            .first()
            .and_then(|r| r.instances().first())
            .ok_or_else(|| {
                ControlPlaneError::Malformed(format!("no instance record for {}", id))
            })?;

        let state_name = instance
            .state()
            .and_then(|s| s.name())
            .map(|n| n.as_str())
            .ok_or_else(|| {
                ControlPlaneError::Malformed(format!("instance {} has no state", id))
            })?;

        let state = LifecycleState::parse(state_name).ok_or_else(|| {
            ControlPlaneError::Malformed(format!("unrecognized instance state '{}'", state_name))
        })?;

        let snapshot = InstanceSnapshot {
            state,
            instance_type: instance
                .instance_type()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            az: instance
                .placement()
                .and_then(|p| p.availability_zone())
                .unwrap_or_default()
                .to_string(),
            launch_time: instance.launch_time().and_then(|t| {
                chrono::DateTime::from_timestamp(t.secs(), t.subsec_nanos())
                    .map(|d| d.to_rfc3339())
            }),
            private_ip: instance.private_ip_address().map(str::to_string),
            public_ip: instance.public_ip_address().map(str::to_string),
        };

        debug!(instance = %id, state = %state_name, "Described instance");

        Ok(snapshot)
    }

    async fn describe_status(&self, id: &str) -> Result<StatusChecks, ControlPlaneError> {
        let response = self
            .client
            .describe_instance_status()
            .instance_ids(id)
            // Without this, stopped/rebooting instances are filtered out
            .include_all_instances(true)
            .send()
            .await
            .map_err(|e| ControlPlaneError::Api(DisplayErrorContext(e).to_string()))?;

        // No status record yet: expected right after a state transition,
        // before the provider re-initializes checks for the instance.
        let Some(status) = response.instance_statuses().first() else {
            debug!(instance = %id, "No status record yet");
            return Ok(StatusChecks::unknown());
        };

        let system = status
            .system_status()
            .and_then(|s| s.status())
            .map(|s| CheckStatus::parse(s.as_str()))
            .unwrap_or(CheckStatus::Unknown);
        let instance = status
            .instance_status()
            .and_then(|s| s.status())
            .map(|s| CheckStatus::parse(s.as_str()))
            .unwrap_or(CheckStatus::Unknown);

        Ok(StatusChecks { system, instance })
    }

    async fn reboot(&self, id: &str) -> Result<(), ControlPlaneError> {
        self.client
            .reboot_instances()
            .instance_ids(id)
            .send()
            .await
            .map_err(|e| ControlPlaneError::Api(DisplayErrorContext(e).to_string()))?;

        debug!(instance = %id, "Reboot command accepted");

        Ok(())
    }
}
