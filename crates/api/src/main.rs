use anyhow::Context;

use hostelgate_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hostelgate_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = hostelgate_api::app::services::build_services(&config)
        .context("failed to start gate services")?;

    let app = hostelgate_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
