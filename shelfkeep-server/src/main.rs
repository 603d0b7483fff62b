//! Shelfkeep Server - REST API for library circulation

use anyhow::Result;
use shelfkeep_server::{config::ServerConfig, routes, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shelfkeep_server=debug,shelfkeep_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Create application state
    let state = state::AppState::new(&config).await?;

    // Build router
    let app = routes::create_router(state.clone(), config.cors_origins.as_deref());

    // Start server
    tracing::info!("Starting server on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Save and exit
    state.save_catalog().await?;
    tracing::info!("Catalog saved, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
