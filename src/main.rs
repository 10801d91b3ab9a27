use aws_config::{BehaviorVersion, Region};
use kunto::cloud::{ControlPlane, Ec2ControlPlane, Notifier, SnsNotifier};
use kunto::config::Config;
use kunto::server::{create_metrics, run_server, AppState, ReadinessState};
use kunto::workflow::WorkflowContext;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting kunto reboot-verification service");

    let config = Config::from_env()?;
    if config.instance_id.is_none() {
        // The service still comes up and answers probes; the workflow will
        // report the missing configuration per invocation.
        warn!("INSTANCE_ID not set - reboot triggers will fail until configured");
    }
    info!(
        region = %config.region,
        poll_interval_secs = config.poll_interval.as_secs(),
        poll_max_attempts = config.poll_max_attempts,
        auth = config.webhook_token.is_some(),
        notifications = config.topic_arn.is_some(),
        "Configuration loaded"
    );

    // Create readiness state (initially not ready)
    let readiness = ReadinessState::new();
    let metrics = create_metrics()?;

    // Load AWS config once and share it across the EC2 and SNS clients
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let control_plane: Arc<dyn ControlPlane> = Arc::new(Ec2ControlPlane::new(&aws_config));
    let notifier: Option<Arc<dyn Notifier>> = config
        .topic_arn
        .clone()
        .map(|topic| Arc::new(SnsNotifier::new(&aws_config, topic)) as Arc<dyn Notifier>);

    let port = config.port;
    let workflow = Arc::new(WorkflowContext {
        config,
        control_plane,
        notifier,
        metrics: metrics.clone(),
    });

    let state = AppState {
        workflow,
        readiness: readiness.clone(),
        metrics,
    };

    // Mark as ready - clients are constructed and the server is about to bind
    readiness.set_ready();
    info!("Service ready, starting server");

    run_server(port, state).await?;

    Ok(())
}
