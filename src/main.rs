use clap::Parser;
use codesearch::config::SearchdConfig;
use codesearch::ingestion::seed::seed_engine;
use codesearch::search::engine::IndexEngine;
use codesearch::search::handlers::router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SearchdConfig::parse();
    let bind_addr = config.bind_addr()?;

    // 1. Index (rebuilt from scratch on every start):
    let engine = Arc::new(IndexEngine::new());
    let seeded = seed_engine(&engine, config.seed_json.as_deref(), config.seed_demo);
    if seeded > 0 {
        tracing::info!(
            "Index ready: {} documents, {} tokens",
            engine.document_count(),
            engine.token_count()
        );
    }

    // 2. HTTP Router:
    let app = router(engine, config.search_settings());

    // 3. Start HTTP server:
    tracing::info!("searchd listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("searchd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
