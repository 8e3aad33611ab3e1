//! # Tile Depot
//!
//! A lightweight HTTP server for pre-rendered map tile pyramids stored on
//! local disk.
//!
//! Tile Depot serves a directory tree laid out in the standard slippy-map
//! convention (`<tiles root>/<zoom>/<x>/<y>.<format>`) over HTTP, together
//! with a handful of introspection endpoints and a generic static-asset
//! handler for a separate public directory.
//!
//! ## Features
//!
//! - **Slippy-map URLs**: `GET /{z}/{x}/{y}.{format}` maps directly onto the
//!   on-disk pyramid
//! - **Introspection**: service descriptor, health check, and a summary of
//!   the tiles directory structure
//! - **Static assets**: anything under the public root is served with
//!   standard static-file semantics
//! - **Safe path handling**: coordinate and format segments are validated
//!   before any filesystem path is built
//!
//! ## Architecture
//!
//! The library is organized into a few small modules:
//!
//! - [`tile`] - Tile request parsing, content types, and the on-disk store
//! - [`server`] - Axum-based HTTP handlers and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error types shared across the crate
//!
//! ## Example
//!
//! ```rust,no_run
//! use tile_depot::{create_router, RouterConfig, TileStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = TileStore::new("tiles");
//!     let router = create_router(store, "public", RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
//!         .await
//!         .unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod tile;

// Re-export commonly used types
pub use config::Config;
pub use error::TileError;
pub use server::{
    create_router, health_handler, not_found_handler, service_info_handler, tile_handler,
    tiles_info_handler, AppState, ErrorResponse, HealthResponse, RouterConfig,
    ServiceInfoResponse, TilePathParams, TilesInfoResponse,
};
pub use tile::{content_type, LevelStructure, TileRequest, TileStore, MAX_SAMPLE_X_DIRS};
