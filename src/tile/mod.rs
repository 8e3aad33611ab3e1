//! Tile request parsing and the on-disk tile store.
//!
//! This module sits between the HTTP layer and the filesystem:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │   TileRequest (validated z/x/y/format)  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │   TileStore (<root>/<z>/<x>/<y>.<fmt>)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TileRequest`]: Parameters for a single tile request, parsed from
//!   validated URL segments
//! - [`TileStore`]: Read-only access to the tile pyramid plus directory
//!   enumeration for the introspection endpoints
//! - [`content_type`]: The fixed format-to-MIME table

mod store;

pub use store::{LevelStructure, TileStore, MAX_SAMPLE_X_DIRS};

use crate::error::TileError;

// =============================================================================
// Content Types
// =============================================================================

/// Resolve the MIME type for a tile format extension.
///
/// Unrecognized formats return `None`; the handler then omits the
/// Content-Type header and lets the transport default apply.
pub fn content_type(format: &str) -> Option<&'static str> {
    match format {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "pbf" => Some("application/x-protobuf"),
        _ => None,
    }
}

// =============================================================================
// Segment Validation
// =============================================================================

/// Whether a path segment is a plain non-negative integer token.
fn is_coordinate_token(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a format extension is a plain alphanumeric token.
///
/// This intentionally admits unknown extensions (they serve without a
/// Content-Type header) while rejecting anything that could alter the
/// resolved filesystem path.
fn is_format_token(format: &str) -> bool {
    !format.is_empty() && format.bytes().all(|b| b.is_ascii_alphanumeric())
}

// =============================================================================
// Tile Request
// =============================================================================

/// Parameters for a single tile request.
///
/// Constructed from URL path segments once they have been validated, and
/// discarded after the response is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRequest {
    /// Zoom level (larger values denote finer resolution).
    pub z: u32,

    /// Tile X coordinate.
    pub x: u32,

    /// Tile Y coordinate.
    pub y: u32,

    /// Format extension (e.g., "png", "pbf").
    pub format: String,
}

impl TileRequest {
    /// Create a tile request from already-validated components.
    pub fn new(z: u32, x: u32, y: u32, format: impl Into<String>) -> Self {
        Self {
            z,
            x,
            y,
            format: format.into(),
        }
    }

    /// Parse a tile request from raw URL path segments.
    ///
    /// `filename` is the final segment, `<y>.<format>`; it is split at the
    /// last dot. Each of z/x/y must be an all-digit token and the format an
    /// alphanumeric token, so the segments can be joined into a filesystem
    /// path without any traversal risk.
    pub fn from_segments(z: &str, x: &str, filename: &str) -> Result<Self, TileError> {
        let (y, format) = filename
            .rsplit_once('.')
            .ok_or_else(|| TileError::InvalidFormat {
                value: filename.to_string(),
            })?;

        if !is_format_token(format) {
            return Err(TileError::InvalidFormat {
                value: format.to_string(),
            });
        }

        let z = parse_coordinate(z)?;
        let x = parse_coordinate(x)?;
        let y = parse_coordinate(y)?;

        Ok(Self::new(z, x, y, format))
    }

    /// The tile's path relative to the tiles root, `"{z}/{x}/{y}.{format}"`.
    ///
    /// This is the form reported in 404 responses.
    pub fn relative_path(&self) -> String {
        format!("{}/{}/{}.{}", self.z, self.x, self.y, self.format)
    }

    /// The MIME type for this tile's format, if it is a recognized one.
    pub fn content_type(&self) -> Option<&'static str> {
        content_type(&self.format)
    }
}

fn parse_coordinate(segment: &str) -> Result<u32, TileError> {
    if !is_coordinate_token(segment) {
        return Err(TileError::InvalidCoordinate {
            value: segment.to_string(),
        });
    }

    segment
        .parse()
        .map_err(|_| TileError::InvalidCoordinate {
            value: segment.to_string(),
        })
}

// =============================================================================
// Tests
// =============================================================================
