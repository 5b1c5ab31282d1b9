use account_service::{config::AccountConfig, services::metrics, startup::Application};
use service_core::observability::{init_tracing, prometheus_handle};

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid (including an empty JWT_SECRET)
    let config = AccountConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }

    // Install the recorder before describing metrics
    prometheus_handle();
    metrics::init_metrics();

    let service_span = tracing::info_span!(
        "service",
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
    );
    let _guard = service_span.enter();

    tracing::info!("Starting account service");

    let application = Application::build(config).await?;
    application.run_until_stopped().await
}
