mod budget;
mod collaborators;
mod config;
mod errors;
mod journey;
mod lenient;
mod llm_client;
mod locator;
mod orientation;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::collaborators::Collaborators;
use crate::config::Config;
use crate::journey::storage::FileStore;
use crate::journey::store::JourneyStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Parcours API v{}", env!("CARGO_PKG_VERSION"));

    // Journey blob on disk, loaded once; the autosave task owns writes from here on
    let storage = Arc::new(FileStore::open(&config.data_dir)?);
    info!("Journey data directory: {}", config.data_dir.display());
    let (journey, autosave_task) = JourneyStore::open(storage, config.autosave);

    let collaborators = Collaborators::from_config(&config)?;

    let state = AppState {
        journey: journey.clone(),
        collaborators,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Last chance for unsaved edits
    journey.shutdown();
    autosave_task.join().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
