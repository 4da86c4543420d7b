use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use plantd::config::AppConfig;
use plantd::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env()?;
    info!(
        dataset_root = %cfg.dataset_root.display(),
        upload_dir = %cfg.upload_dir.display(),
        preprocess = cfg.preprocess_images,
        "config loaded"
    );

    let app_state = Arc::new(AppState::new(cfg.clone()));
    let app = plantd::router(app_state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    info!("plantd listening on http://{}", cfg.bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
