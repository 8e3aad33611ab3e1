//! Read-only access to the on-disk tile pyramid.
//!
//! The store owns the tiles root path and performs every filesystem
//! operation the server needs: resolving and reading individual tiles, and
//! enumerating the pyramid's directory structure for the introspection
//! endpoints. Nothing is cached; every call reflects the filesystem at the
//! time of the request.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use tokio::fs;
use tracing::warn;

use crate::error::TileError;
use crate::tile::TileRequest;

/// Maximum number of x-directory names reported per zoom level by the
/// tiles-info endpoint.
pub const MAX_SAMPLE_X_DIRS: usize = 5;

// =============================================================================
// Level Structure
// =============================================================================

/// Summary of one zoom level's immediate subdirectories.
///
/// A level whose directory cannot be read degrades to the error variant
/// instead of failing the whole introspection response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LevelStructure {
    Listing {
        /// Number of immediate subdirectories (x-coordinate buckets).
        x_directories: usize,

        /// Up to [`MAX_SAMPLE_X_DIRS`] subdirectory names, sorted.
        sample_x_dirs: Vec<String>,
    },
    Unreadable {
        error: String,
    },
}

impl LevelStructure {
    fn unreadable() -> Self {
        Self::Unreadable {
            error: "Cannot read directory".to_string(),
        }
    }
}

// =============================================================================
// Tile Store
// =============================================================================

/// Read-only view over a tile pyramid directory.
///
/// The filesystem tree is an external resource owned by the deployment
/// environment; the store never mutates it.
#[derive(Debug, Clone)]
pub struct TileStore {
    root: PathBuf,
}

impl TileStore {
    /// Create a store rooted at the given tiles directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The tiles root as configured.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The tiles root as an absolute path, for reporting in tiles-info.
    pub fn absolute_root(&self) -> PathBuf {
        if self.root.is_absolute() {
            self.root.clone()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&self.root))
                .unwrap_or_else(|_| self.root.clone())
        }
    }

    /// Resolve a tile request to its on-disk path,
    /// `<root>/<z>/<x>/<y>.<format>`.
    ///
    /// Segments were validated as digit/alphanumeric tokens when the request
    /// was parsed, so the join cannot escape the root.
    pub fn tile_path(&self, request: &TileRequest) -> PathBuf {
        self.root
            .join(request.z.to_string())
            .join(request.x.to_string())
            .join(format!("{}.{}", request.y, request.format))
    }

    /// Read a tile's bytes.
    ///
    /// The existence check and the read are separate steps on purpose: a
    /// file that disappears or fails between them is a transmission failure
    /// ([`TileError::ReadFailed`]), not a missing tile.
    pub async fn read_tile(&self, request: &TileRequest) -> Result<Bytes, TileError> {
        let path = self.tile_path(request);

        if fs::metadata(&path).await.is_err() {
            return Err(TileError::NotFound {
                path: request.relative_path(),
            });
        }

        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(source) => Err(TileError::ReadFailed {
                path: request.relative_path(),
                source,
            }),
        }
    }

    /// Enumerate the available zoom levels, sorted ascending.
    ///
    /// Immediate subdirectories of the tiles root whose names parse as
    /// integers are zoom levels; everything else is ignored. A failure to
    /// read the root degrades to an empty list.
    pub async fn zoom_levels(&self) -> Vec<u32> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) => {
                warn!("Failed to read tiles root {}: {}", self.root.display(), e);
                return Vec::new();
            }
        };

        let mut levels = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = entry
                        .file_type()
                        .await
                        .map(|file_type| file_type.is_dir())
                        .unwrap_or(false);
                    if !is_dir {
                        continue;
                    }
                    if let Some(level) = entry.file_name().to_str().and_then(|n| n.parse().ok()) {
                        levels.push(level);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read tiles root {}: {}", self.root.display(), e);
                    break;
                }
            }
        }

        levels.sort_unstable();
        levels
    }

    /// Summarize one zoom level's immediate subdirectories.
    pub async fn level_structure(&self, level: u32) -> LevelStructure {
        let level_dir = self.root.join(level.to_string());

        let mut dir = match fs::read_dir(&level_dir).await {
            Ok(dir) => dir,
            Err(e) => {
                warn!("Failed to read level {}: {}", level_dir.display(), e);
                return LevelStructure::unreadable();
            }
        };

        let mut names = Vec::new();
        loop {
            match dir.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = entry
                        .file_type()
                        .await
                        .map(|file_type| file_type.is_dir())
                        .unwrap_or(false);
                    if !is_dir {
                        continue;
                    }
                    if let Some(name) = entry.file_name().to_str() {
                        names.push(name.to_string());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read level {}: {}", level_dir.display(), e);
                    return LevelStructure::unreadable();
                }
            }
        }

        names.sort();
        let x_directories = names.len();
        names.truncate(MAX_SAMPLE_X_DIRS);

        LevelStructure::Listing {
            x_directories,
            sample_x_dirs: names,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
