//! Filesystem asset store: full images and pre-rendered tiles.
//!
//! Assets live under a gallery root using fixed path conventions:
//!
//! - full image: `Images/FullImages/<name>.jpg`
//! - tile:       `Images/ImageTiles/<name>_<bucket>_<col>_<row>.png`
//!
//! where `bucket` is the tile's scale bucket, `round(scale * 1000)` (so the
//! 1:1 level is `1000`, the half-resolution level `500`, and so on).
//!
//! Loads are deliberately uncached: every request hits the filesystem and
//! decodes fresh bytes. Callers that want reuse wrap the store in a
//! [`TileCache`](crate::tile::TileCache).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use crate::error::AssetError;
use crate::tile::TileResolver;

/// Directory of full-resolution JPEG images, relative to the gallery root.
pub const FULL_IMAGE_DIR: &str = "Images/FullImages";

/// Directory of pre-rendered PNG tiles, relative to the gallery root.
pub const TILE_DIR: &str = "Images/ImageTiles";

/// Quantize a draw scale into the tile naming convention's scale bucket.
pub fn scale_bucket(scale: f32) -> u32 {
    (scale * 1000.0).round() as u32
}

// =============================================================================
// AssetStore
// =============================================================================

/// Uncached filesystem loader for gallery assets.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Create a store rooted at the gallery directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the full-resolution image for `name`.
    pub fn full_image_path(&self, name: &str) -> PathBuf {
        self.root.join(FULL_IMAGE_DIR).join(format!("{name}.jpg"))
    }

    /// Path of the tile for `name` at a scale bucket and grid cell.
    pub fn tile_path(&self, name: &str, bucket: u32, col: i32, row: i32) -> PathBuf {
        self.root
            .join(TILE_DIR)
            .join(format!("{name}_{bucket}_{col}_{row}.png"))
    }

    /// Load and decode the full-resolution image for `name`.
    pub fn load_full_image(&self, name: &str) -> Result<RgbaImage, AssetError> {
        decode(self.full_image_path(name))
    }

    /// Load and decode one tile.
    pub fn load_tile(
        &self,
        name: &str,
        scale: f32,
        col: i32,
        row: i32,
    ) -> Result<RgbaImage, AssetError> {
        decode(self.tile_path(name, scale_bucket(scale), col, row))
    }
}

fn decode(path: PathBuf) -> Result<RgbaImage, AssetError> {
    let bytes = fs::read(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            AssetError::NotFound { path: path.clone() }
        } else {
            AssetError::Read {
                path: path.clone(),
                source,
            }
        }
    })?;
    let img = image::load_from_memory(&bytes)
        .map_err(|source| AssetError::Decode { path, source })?;
    Ok(img.to_rgba8())
}

impl TileResolver for AssetStore {
    /// Resolve a tile straight from disk.
    ///
    /// Absence is normal (the grid cell stays undrawn); any other failure is
    /// logged and likewise treated as "no tile" so one bad asset cannot
    /// abort a redraw.
    fn resolve_tile(
        &mut self,
        image_name: &str,
        scale: f32,
        col: i32,
        row: i32,
    ) -> Option<Arc<RgbaImage>> {
        match self.load_tile(image_name, scale, col, row) {
            Ok(tile) => Some(Arc::new(tile)),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                debug!(image = image_name, col, row, error = %e, "dropping unreadable tile");
                None
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
