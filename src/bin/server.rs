//! Paper search HTTP server binary.
//!
//! Reads its TOML configuration from `$PAPERLENS_CONFIG` or the default
//! config path (built-in defaults when neither exists), serves until
//! Ctrl-C, then shuts down.

use paperlens::config::AppConfig;
use paperlens::server::PaperServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = AppConfig::resolve_path();
    let config = AppConfig::load_or_default(&path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?;

    tracing::info!(
        sources = ?config.search.sources,
        max_results = config.search.max_results,
        "paperlens-server starting"
    );

    let server = PaperServer::start(&config).await.map_err(|e| {
        tracing::error!(error = %e, "paperlens-server failed to start");
        anyhow::anyhow!("paperlens-server failed: {e}")
    })?;

    tokio::signal::ctrl_c().await?;
    server.shutdown();

    tracing::info!("paperlens-server shut down cleanly");
    Ok(())
}
