use anyhow::Context;
use tracing_subscriber::EnvFilter;

use popcorn_gallery::{app, config, is_production};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "popcorn_gallery=info,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Popcorn Gallery API in {:?} mode", config.environment);

    if is_production!() && config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL must be set in production");
    }

    let state = app::AppState::from_config(config).await?;
    let router = app::with_http_layers(app::router(state), config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Popcorn Gallery API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
