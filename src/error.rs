use thiserror::Error;

/// Errors that can occur while resolving and serving a tile.
#[derive(Debug, Error)]
pub enum TileError {
    /// A zoom/x/y path segment is not a plain non-negative integer.
    ///
    /// Coordinate segments are validated before any filesystem path is
    /// constructed, so traversal tokens such as `..` are rejected here.
    #[error("Invalid tile coordinate: {value:?}")]
    InvalidCoordinate { value: String },

    /// The format extension is missing or contains non-alphanumeric
    /// characters.
    #[error("Invalid tile format: {value:?}")]
    InvalidFormat { value: String },

    /// No file exists for the requested tile (should map to HTTP 404).
    ///
    /// Sparse pyramids are common, so this is an expected outcome rather
    /// than a fault.
    #[error("Tile not found: {path}")]
    NotFound { path: String },

    /// The tile existed but reading it failed (should map to HTTP 500).
    #[error("Failed to read tile {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
