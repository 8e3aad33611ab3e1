//! HTTP server layer for Tile Depot.
//!
//! This module provides the HTTP API over the on-disk tile pyramid.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │              GET /{z}/{x}/{y}.{format}                          │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌───────────────────┐   │
//! │  │  handlers   │  │  static assets   │  │      routes       │   │
//! │  │ (requests)  │  │ (public root)    │  │ (router config)   │   │
//! │  └─────────────┘  └──────────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, not_found_handler, service_info_handler, tile_handler, tiles_info_handler,
    AppState, ErrorResponse, HealthResponse, ServiceInfoResponse, TilePathParams,
    TilesInfoResponse,
};
pub use routes::{create_router, RouterConfig};
