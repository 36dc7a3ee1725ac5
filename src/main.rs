// calorie-advisor - Food photo to calorie and nutrition breakdown via Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use calorie_advisor::cli::Args;
use calorie_advisor::config::AppConfig;
use calorie_advisor::gemini::GeminiClient;
use calorie_advisor::server::create_router;
use calorie_advisor::utils::logging;
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Pick up GOOGLE_API_KEY and friends from .env, if present
    let dotenv_path = dotenv::dotenv().ok();

    // Phase 2: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 3: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting calorie-advisor v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    // Phase 4: Build the Gemini client (fails fast without an API key)
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Using Gemini model {}", gemini_client.model());

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), gemini_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
