//! Domain types for instance state and health checks.
//!
//! Wire names follow the EC2 API's own strings (kebab-case) so snapshots
//! serialize into the response envelope exactly as the provider reports them.

use serde::{Deserialize, Serialize, Serializer};

/// Instance lifecycle state as reported by the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    Pending,
    Running,
    Stopping,
    Stopped,
    ShuttingDown,
    Terminated,
}

impl LifecycleState {
    /// Parse a provider state name ("running", "shutting-down", ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "stopping" => Some(Self::Stopping),
            "stopped" => Some(Self::Stopped),
            "shutting-down" => Some(Self::ShuttingDown),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

/// Point-in-time read of an instance's metadata
///
/// Immutable once captured; the workflow takes one before and one after
/// the reboot, and both land verbatim in the response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    /// Lifecycle state at read time
    pub state: LifecycleState,

    /// Instance type name (e.g. "t3.micro")
    pub instance_type: String,

    /// Availability zone
    pub az: String,

    /// Launch time in RFC3339, absent if the provider omitted it
    pub launch_time: Option<String>,

    /// Private IPv4 address, absent while not assigned
    pub private_ip: Option<String>,

    /// Public IPv4 address, absent while not assigned
    pub public_ip: Option<String>,
}

/// One dimension of a provider status check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckStatus {
    Ok,
    Impaired,
    InsufficientData,
    NotApplicable,
    Initializing,
    Unknown,
}

impl CheckStatus {
    /// Parse a provider summary-status string; unrecognized values map to
    /// Unknown rather than failing, since new provider states must not
    /// break the workflow.
    pub fn parse(status: &str) -> Self {
        match status {
            "ok" => Self::Ok,
            "impaired" => Self::Impaired,
            "insufficient-data" => Self::InsufficientData,
            "not-applicable" => Self::NotApplicable,
            "initializing" => Self::Initializing,
            _ => Self::Unknown,
        }
    }
}

/// Result of one status-check read, split into the provider's system and
/// instance dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChecks {
    pub system: CheckStatus,
    pub instance: CheckStatus,
}

impl StatusChecks {
    /// Sentinel for the window right after a reboot is issued, before the
    /// provider has re-initialized a status record for the instance.
    pub fn unknown() -> Self {
        Self {
            system: CheckStatus::Unknown,
            instance: CheckStatus::Unknown,
        }
    }

    /// Healthy means both dimensions report ok
    pub fn is_healthy(&self) -> bool {
        self.system == CheckStatus::Ok && self.instance == CheckStatus::Ok
    }
}

/// A before/after block of the response envelope
///
/// Both halves are optional: best-effort reads that fail degrade to an
/// empty block instead of propagating. Absent halves serialize as `{}`
/// to keep the envelope shape stable across paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateReport {
    #[serde(serialize_with = "or_empty_object")]
    pub describe: Option<InstanceSnapshot>,

    #[serde(serialize_with = "or_empty_object")]
    pub checks: Option<StatusChecks>,
}

impl StateReport {
    pub fn new(describe: InstanceSnapshot, checks: StatusChecks) -> Self {
        Self {
            describe: Some(describe),
            checks: Some(checks),
        }
    }

    /// An empty report: both reads unavailable
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.describe.is_none() && self.checks.is_none()
    }
}

/// Serialize `None` as `{}` instead of `null`
fn or_empty_object<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
