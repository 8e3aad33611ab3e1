//! Router configuration for Tile Depot.
//!
//! This module defines the HTTP routes and applies the CORS, tracing, and
//! panic-catching middleware.
//!
//! # Route Structure
//!
//! ```text
//! /                        - Service descriptor (live zoom-level list)
//! /health                  - Health check
//! /tiles-info              - Tiles directory summary
//! /{z}/{x}/{y}.{format}    - Tile endpoint
//! /*                       - Static assets from the public root,
//!                            JSON 404 fallback
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tile_depot::{create_router, RouterConfig, TileStore};
//!
//! let store = TileStore::new("tiles");
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(store, "public", config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::any::Any;
use std::path::Path;
use std::time::Duration;

use axum::{
    body::Body,
    handler::HandlerWithoutStateExt,
    http::{header::CONTENT_TYPE, StatusCode},
    routing::get,
    Router,
};
use http::Method;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::handlers::{
    health_handler, not_found_handler, service_info_handler, tile_handler, tiles_info_handler,
    AppState,
};
use crate::tile::TileStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds for tile responses
    pub cache_max_age: u32,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with defaults:
    /// - CORS allows any origin
    /// - Cache max-age is 1 hour (3600 seconds)
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            cache_max_age: 3600,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - The tile route and introspection routes
/// - A static-asset fallback over the public root with a JSON 404
/// - CORS configuration
/// - A panic-catching boundary
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `store` - The tile store over the tiles root
/// * `public_dir` - The public assets root for the static fallback
/// * `config` - Router configuration
pub fn create_router(store: TileStore, public_dir: impl AsRef<Path>, config: RouterConfig) -> Router {
    let state = AppState::with_cache_max_age(store, config.cache_max_age);

    // Static assets for everything no explicit route claims. A miss under
    // the public root falls through to the JSON 404, which also covers
    // unmatched routes.
    let static_assets =
        ServeDir::new(public_dir.as_ref()).not_found_service(not_found_handler.into_service());

    let router = Router::new()
        .route("/", get(service_info_handler))
        .route("/health", get(health_handler))
        .route("/tiles-info", get(tiles_info_handler))
        .route("/{z}/{x}/{filename}", get(tile_handler))
        .fallback_service(static_assets)
        .with_state(state)
        .layer(build_cors_layer(&config))
        .layer(CatchPanicLayer::custom(panic_response));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(AnyOrigin),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

/// Build the 500 response for a panicking handler.
///
/// The catch-all boundary of last resort: a fault that escapes a handler is
/// reported as JSON instead of tearing down the connection.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> http::Response<Body> {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!("Handler panicked: {}", message);

    let body = serde_json::json!({
        "error": "Internal server error",
        "message": message,
    })
    .to_string();

    http::Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Tests
// =============================================================================
