//! Tile Depot - an HTTP server for pre-rendered map tile pyramids.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_depot::{
    config::Config,
    server::{create_router, RouterConfig},
    tile::TileStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Tile Depot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Tiles root: {}", config.tiles_dir.display());
    info!("  Public assets: {}", config.public_dir.display());
    info!("  Cache max-age: {}s", config.cache_max_age);

    if !config.public_dir.is_dir() {
        warn!(
            "  Public directory '{}' does not exist; static requests will 404",
            config.public_dir.display()
        );
    }

    // Create the tile store and report what it sees
    let store = TileStore::new(&config.tiles_dir);
    let levels = store.zoom_levels().await;
    if levels.is_empty() {
        warn!("  No zoom levels found under the tiles root");
    } else {
        info!("  Found {} zoom level(s): {:?}", levels.len(), levels);
    }

    // Build router configuration
    let mut router_config = RouterConfig::new()
        .with_cache_max_age(config.cache_max_age)
        .with_tracing(!config.no_tracing);
    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    // Create router
    let router = create_router(store, &config.public_dir, router_config);

    // Bind and serve
    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/tiles-info", addr);
    info!("");
    info!("  Fetch a tile directly:");
    info!("    curl http://{}/<z>/<x>/<y>.png", addr);
    info!("");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

/// Resolve when the process receives an interrupt or terminate request.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tile_depot=debug,tower_http=debug"
    } else {
        "tile_depot=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
