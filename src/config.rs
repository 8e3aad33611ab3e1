//! Configuration management for Tile Depot.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `PORT` - Server port (default: 3000; unparsable values fall back to the
//!   default rather than aborting startup)
//! - `TILE_DEPOT_HOST` - Server bind address (default: 0.0.0.0)
//! - `TILE_DEPOT_TILES_DIR` - Tiles root directory (default: tiles)
//! - `TILE_DEPOT_PUBLIC_DIR` - Public assets root (default: public)
//! - `TILE_DEPOT_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `TILE_DEPOT_CORS_ORIGINS` - Allowed CORS origins, comma separated

use std::path::PathBuf;

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default tiles root directory, relative to the working directory.
pub const DEFAULT_TILES_DIR: &str = "tiles";

/// Default public assets root, relative to the working directory.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default HTTP cache max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Tile Depot - an HTTP server for pre-rendered map tile pyramids.
///
/// Serves tiles from a local `<tiles root>/<zoom>/<x>/<y>.<format>` directory
/// tree, plus static assets from a separate public directory.
#[derive(Parser, Debug, Clone)]
#[command(name = "tile-depot")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "TILE_DEPOT_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT", value_parser = parse_port)]
    pub port: u16,

    // =========================================================================
    // Filesystem Layout
    // =========================================================================
    /// Directory containing the tile pyramid (`<zoom>/<x>/<y>.<format>`).
    #[arg(long, default_value = DEFAULT_TILES_DIR, env = "TILE_DEPOT_TILES_DIR")]
    pub tiles_dir: PathBuf,

    /// Directory containing general static assets.
    #[arg(long, default_value = DEFAULT_PUBLIC_DIR, env = "TILE_DEPOT_PUBLIC_DIR")]
    pub public_dir: PathBuf,

    // =========================================================================
    // HTTP Configuration
    // =========================================================================
    /// Cache-Control max-age in seconds for tile responses.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "TILE_DEPOT_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "TILE_DEPOT_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

/// Parse a port value, falling back to [`DEFAULT_PORT`] when unparsable.
fn parse_port(value: &str) -> Result<u16, std::convert::Infallible> {
    Ok(value.parse().unwrap_or(DEFAULT_PORT))
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.tiles_dir.is_dir() {
            return Err(format!(
                "Tiles directory '{}' does not exist or is not a directory. \
                 Set --tiles-dir or TILE_DEPOT_TILES_DIR",
                self.tiles_dir.display()
            ));
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
