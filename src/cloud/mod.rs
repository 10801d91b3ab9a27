//! Cloud provider integration: control-plane client, notification channel,
//! and the domain types both sides exchange.

pub mod control_plane;
pub mod ec2;
pub mod sns;
pub mod types;

pub use control_plane::{ControlPlane, ControlPlaneError};
pub use ec2::Ec2ControlPlane;
pub use sns::{Notifier, NotifyError, SnsNotifier};
pub use types::{CheckStatus, InstanceSnapshot, LifecycleState, StateReport, StatusChecks};
