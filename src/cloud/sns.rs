//! Outcome notification via SNS
//!
//! The workflow publishes a one-line message on the success path. Delivery
//! is best-effort at the call site: the orchestrator logs and ignores any
//! failure here, so this layer stays a plain publish wrapper.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification publish failed: {0}")]
    Publish(String),
}

/// Notification channel seam
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

/// Notifier publishing to an SNS topic
pub struct SnsNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(config: &aws_config::SdkConfig, topic_arn: String) -> Self {
        Self {
            client: Client::new(config),
            topic_arn,
        }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| NotifyError::Publish(DisplayErrorContext(e).to_string()))?;

        debug!(topic = %self.topic_arn, "Notification published");

        Ok(())
    }
}
