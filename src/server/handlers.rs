//! HTTP request handlers for the Tile Depot API.
//!
//! This module contains the Axum handlers for serving tiles and the
//! introspection endpoints.
//!
//! # Endpoints
//!
//! - `GET /{z}/{x}/{y}.{format}` - Serve a tile
//! - `GET /` - Service descriptor with live zoom-level list
//! - `GET /health` - Health check endpoint
//! - `GET /tiles-info` - Tiles directory summary

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::TileError;
use crate::tile::{LevelStructure, TileRequest, TileStore};

/// URL template shown in the service descriptor.
const USAGE_TEMPLATE: &str = "/{z}/{x}/{y}.{format}";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the tile store.
///
/// This is passed to all handlers via Axum's State extractor. Nothing in it
/// mutates after startup; handlers read only from the filesystem and write
/// only to their own response.
#[derive(Clone)]
pub struct AppState {
    /// The tile store for resolving and reading tiles
    pub store: Arc<TileStore>,

    /// Process start time, for the uptime report in /health
    pub started_at: Instant,

    /// Cache-Control max-age in seconds for tile responses
    pub cache_max_age: u32,
}

impl AppState {
    /// Create a new application state with the given tile store.
    pub fn new(store: TileStore) -> Self {
        Self::with_cache_max_age(store, 3600)
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(store: TileStore, cache_max_age: u32) -> Self {
        Self {
            store: Arc::new(store),
            started_at: Instant::now(),
            cache_max_age,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters for tile requests.
///
/// Extracted from: `/{z}/{x}/{filename}` where filename is `{y}.{format}`.
/// Segments arrive as raw strings and are validated by
/// [`TileRequest::from_segments`] before any filesystem path is built.
#[derive(Debug, Deserialize)]
pub struct TilePathParams {
    /// Zoom level segment
    pub z: String,

    /// Tile X coordinate segment
    pub x: String,

    /// Tile Y coordinate with format extension (e.g., "131072.png")
    pub filename: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response for unmatched routes and static-asset misses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error summary (e.g., "Not found")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Service descriptor returned from the root route.
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    /// Service name
    pub name: String,

    /// Service version
    pub version: String,

    /// Tile URL template
    pub usage: String,

    /// Zoom levels currently present under the tiles root, sorted ascending
    pub available_levels: Vec<u32>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Current time, RFC 3339
    pub timestamp: String,

    /// Process uptime in seconds
    pub uptime: f64,
}

/// Tiles directory summary returned from /tiles-info.
#[derive(Debug, Serialize)]
pub struct TilesInfoResponse {
    /// Absolute path of the tiles root
    pub tiles_directory: String,

    /// Zoom levels currently present, sorted ascending
    pub available_levels: Vec<u32>,

    /// Per-level subdirectory summary, keyed by zoom level
    pub structure: BTreeMap<u32, LevelStructure>,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert TileError to HTTP response.
///
/// Response bodies are deliberately small and fixed:
/// - Missing tile: 404 `{"error":"Tile not found","path":"{z}/{x}/{y}.{format}"}`
/// - Read failure: 500 `{"error":"Error serving tile"}`
/// - Invalid segment: 400 `{"error":...,"message":...}`
///
/// Missing tiles are logged at debug (sparse pyramids make them routine);
/// read failures are logged at error.
impl IntoResponse for TileError {
    fn into_response(self) -> Response {
        match self {
            TileError::NotFound { path } => {
                debug!(path = %path, "Tile not found");
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({
                        "error": "Tile not found",
                        "path": path,
                    })),
                )
                    .into_response()
            }

            TileError::ReadFailed { path, source } => {
                error!(path = %path, "Failed to read tile: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": "Error serving tile",
                    })),
                )
                    .into_response()
            }

            TileError::InvalidCoordinate { value } => {
                warn!(value = %value, "Rejected tile coordinate");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "Invalid tile coordinate",
                        format!("Coordinate {:?} is not a non-negative integer", value),
                    )),
                )
                    .into_response()
            }

            TileError::InvalidFormat { value } => {
                warn!(value = %value, "Rejected tile format");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "Invalid tile format",
                        format!("Format {:?} is not an alphanumeric extension", value),
                    )),
                )
                    .into_response()
            }
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle tile requests.
///
/// # Endpoint
///
/// `GET /{z}/{x}/{y}.{format}`
///
/// # Response
///
/// - `200 OK`: Tile bytes, with `Content-Type` from the fixed format table
///   (omitted for unrecognized formats) and
///   `Cache-Control: public, max-age={cache_max_age}`
/// - `400 Bad Request`: Malformed coordinate or format segment
/// - `404 Not Found`: No such tile on disk
/// - `500 Internal Server Error`: Tile existed but could not be read
pub async fn tile_handler(
    State(state): State<AppState>,
    Path(params): Path<TilePathParams>,
) -> Result<Response, TileError> {
    let request = TileRequest::from_segments(&params.z, &params.x, &params.filename)?;
    let data = state.store.read_tile(&request).await?;

    let mut builder = Response::builder().status(StatusCode::OK).header(
        header::CACHE_CONTROL,
        format!("public, max-age={}", state.cache_max_age),
    );

    if let Some(content_type) = request.content_type() {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    Ok(builder.body(Body::from(data)).unwrap())
}

/// Handle service descriptor requests.
///
/// # Endpoint
///
/// `GET /`
///
/// Always returns `200 OK`; if the zoom-level enumeration fails internally
/// it degrades to an empty list rather than erroring the response.
pub async fn service_info_handler(State(state): State<AppState>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        usage: USAGE_TEMPLATE.to_string(),
        available_levels: state.store.zoom_levels().await,
    })
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2026-01-01T00:00:00+00:00",
///   "uptime": 12.5
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// Handle tiles directory summary requests.
///
/// # Endpoint
///
/// `GET /tiles-info`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "tiles_directory": "/srv/tiles",
///   "available_levels": [17, 18, 20],
///   "structure": {
///     "17": {"x_directories": 4, "sample_x_dirs": ["0", "1", "2", "3"]},
///     "18": {"error": "Cannot read directory"}
///   }
/// }
/// ```
///
/// Unreadable levels degrade to an error entry without failing the whole
/// response.
pub async fn tiles_info_handler(State(state): State<AppState>) -> Json<TilesInfoResponse> {
    let available_levels = state.store.zoom_levels().await;

    let mut structure = BTreeMap::new();
    for level in &available_levels {
        structure.insert(*level, state.store.level_structure(*level).await);
    }

    Json(TilesInfoResponse {
        tiles_directory: state.store.absolute_root().display().to_string(),
        available_levels,
        structure,
    })
}

/// Handle unmatched routes and static-asset misses.
///
/// Wired as the not-found service behind the static file handler, so both
/// "no such asset" and "no such route" produce the same JSON 404.
pub async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "Not found",
            format!("Path {} not found", uri.path()),
        )),
    )
}

// =============================================================================
// Tests
// =============================================================================
