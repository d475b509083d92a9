// grievance-relay - Image-to-Gemini grievance classification relay
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use grievance_relay::cli::Args;
use grievance_relay::config::AppConfig;
use grievance_relay::gemini::GeminiClient;
use grievance_relay::server::create_router;
use grievance_relay::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments (also picks up PORT and GEMINI_API_KEY)
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(&args)?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting grievance-relay v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build upstream client
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Relaying classifications to {}", gemini_client.api_url());
    if config.gemini.timeout_seconds.is_none() {
        warn!("No upstream timeout configured; slow Gemini calls will hold requests open");
    }

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, gemini_client)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
