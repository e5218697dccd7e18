//! Turn Timer - An HTTP-controlled board of turn timers
//!
//! This is the main entry point for the turn-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use turn_timer::{
    api::create_router,
    config::Config,
    state::{AppState, Board},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("turn_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting turn-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, players={}, max_time={}min",
          config.host, config.port, config.players.count(), config.max_time);

    // One timer per player, all stopped until the first press
    let board = Board::with_timers(config.players.count(), config.initial_seconds());
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        board,
        config.initial_seconds(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timers              - List timers");
    info!("  POST   /timers              - Add a timer");
    info!("  DELETE /timers/:id          - Remove a timer");
    info!("  POST   /timers/:id/press    - Press a timer");
    info!("  POST   /timers/:id/rotate   - Rotate a timer face");
    info!("  PUT    /timers/:id/duration - Set one timer's duration");
    info!("  PUT    /timers/duration     - Set every timer's duration");
    info!("  PUT    /active              - Set the active timer");
    info!("  POST   /pause, /resume      - Pause or resume the board");
    info!("  GET    /status, /health     - Status and health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = wait_for_shutdown() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on SIGINT/SIGTERM; never resolve if signals cannot be observed
async fn wait_for_shutdown() {
    if let Err(e) = shutdown_signal().await {
        tracing::error!("Failed to listen for shutdown signals: {}", e);
        std::future::pending::<()>().await;
    }
}
