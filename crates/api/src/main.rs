use anyhow::Context;
use blog_api::handler::AppRouter;
use shared::{
    abstract_trait::AuthServiceTrait,
    config::{Config, ConnectionManager},
    state::AppState,
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("blog-api", config.otel_endpoint.clone());
    let tracer_provider = telemetry.init_tracer()?;
    let meter_provider = telemetry.init_meter()?;
    let logger_provider = telemetry.init_logger()?;

    init_logger(logger_provider.clone());

    let pool = ConnectionManager::new_pool(&config.database_url, config.run_migrations).await?;

    let state = AppState::new(pool, &config);

    if let Some(admin) = &config.admin {
        state
            .di_container
            .auth_service
            .bootstrap_admin(admin)
            .await
            .context("Failed to bootstrap the administrator")?;
    }

    info!("🚀 Server started successfully on port {}", config.port);

    let served = AppRouter::serve(config.port, state).await;
    if let Err(e) = &served {
        error!("Server stopped with error: {:#}", e);
    }

    let mut shutdown_errors = Vec::new();
    if let Err(e) = tracer_provider.shutdown() {
        shutdown_errors.push(format!("tracer provider: {e}"));
    }
    if let Err(e) = meter_provider.shutdown() {
        shutdown_errors.push(format!("meter provider: {e}"));
    }
    if let Err(e) = logger_provider.shutdown() {
        shutdown_errors.push(format!("logger provider: {e}"));
    }
    if !shutdown_errors.is_empty() {
        anyhow::bail!(
            "Failed to shutdown providers:\n{}",
            shutdown_errors.join("\n")
        );
    }

    served
}
