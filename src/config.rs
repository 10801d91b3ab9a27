//! Environment-provided configuration
//!
//! Built once at startup and threaded through the workflow immutably; no
//! knob is read from the environment mid-flight. Values are trimmed and an
//! empty string is treated the same as an unset variable, so e.g. setting
//! `WEBHOOK_TOKEN=""` disables the auth check entirely.

use std::time::Duration;
use thiserror::Error;

/// Default health-poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default health-poll attempt budget (with the default interval this is a
/// ten-minute ceiling; keep interval * attempts under any hosting execution
/// limit)
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 60;

/// Default port for the webhook and health endpoints
pub const DEFAULT_PORT: u16 = 8080;

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidNumber { key: String, value: String },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Target instance. Required for the workflow; its absence is reported
    /// per invocation rather than failing startup, so the service still
    /// comes up and answers health probes.
    pub instance_id: Option<String>,

    /// AWS region selector
    pub region: String,

    /// Notification topic. Absent means the notify step is skipped.
    pub topic_arn: Option<String>,

    /// Shared secret for the webhook gate. Absent means no auth check.
    pub webhook_token: Option<String>,

    /// Fixed delay between health polls
    pub poll_interval: Duration,

    /// Health-poll attempt budget
    pub poll_max_attempts: u32,

    /// HTTP listen port
    pub port: u16,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an injectable lookup (used by tests to
    /// avoid touching the process environment)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let region = get("AWS_REGION")
            .or_else(|| get("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let poll_interval_secs = parse_or_default(
            "KUNTO_POLL_INTERVAL_SECS",
            get("KUNTO_POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        let poll_max_attempts = parse_or_default(
            "KUNTO_POLL_MAX_ATTEMPTS",
            get("KUNTO_POLL_MAX_ATTEMPTS"),
            DEFAULT_POLL_MAX_ATTEMPTS,
        )?;
        let port = parse_or_default("KUNTO_PORT", get("KUNTO_PORT"), DEFAULT_PORT)?;

        Ok(Config {
            instance_id: get("INSTANCE_ID"),
            region,
            topic_arn: get("SNS_TOPIC_ARN"),
            webhook_token: get("WEBHOOK_TOKEN"),
            poll_interval: Duration::from_secs(poll_interval_secs),
            poll_max_attempts,
            port,
        })
    }
}

fn parse_or_default<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
