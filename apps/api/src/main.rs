mod config;
mod errors;
mod generation;
mod layout;
mod models;
mod orchestrator;
mod routes;
mod script;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::composition::CompositionSynthesizer;
use crate::orchestrator::{HttpOrchestrator, OfflineOrchestrator, Orchestrator};
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

    info!("Starting PanelForge API v{}", env!("CARGO_PKG_VERSION"));

    // Orchestrator: remote when configured, otherwise every panel uses the fallback composition
    let orchestrator: Arc<dyn Orchestrator> = match &config.orchestrator_url {
        Some(url) => {
            let client = HttpOrchestrator::new(
                url,
                config.orchestrator_api_key.clone(),
                config.orchestrator_timeout,
            )?;
            info!("Orchestrator client initialized ({url})");
            Arc::new(client)
        }
        None => {
            warn!("ORCHESTRATOR_URL not set; panels will use fallback compositions");
            Arc::new(OfflineOrchestrator)
        }
    };

    let synthesizer = CompositionSynthesizer::new(
        orchestrator,
        config.orchestrator_timeout,
        config.orchestrator_max_agents,
    );

    let shutdown = CancellationToken::new();

    let state = AppState {
        config: config.clone(),
        synthesizer: Arc::new(synthesizer),
        shutdown: shutdown.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C and cancels in-flight orchestration waits.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
