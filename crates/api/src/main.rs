use anyhow::Context;

use warehouse_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    warehouse_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    let app = warehouse_api::app::build_app(&config)
        .await
        .context("failed to initialize document store")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
