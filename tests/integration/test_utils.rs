//! Test utilities for integration tests.
//!
//! Builds throwaway gallery directories on disk: an `ImageData.xml` catalog
//! plus real JPEG full images and PNG tiles laid out under the store's path
//! conventions.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

use photo_pager::store::{scale_bucket, FULL_IMAGE_DIR, TILE_DIR};

// =============================================================================
// Gallery fixture
// =============================================================================

/// A temporary gallery directory, deleted on drop.
pub struct GalleryFixture {
    dir: TempDir,
}

impl GalleryFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp gallery"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root().join("ImageData.xml")
    }

    /// Write a catalog of `(name, width, height)` entries.
    pub fn write_catalog(&self, entries: &[(&str, u32, u32)]) {
        let mut xml = String::from("<ArrayOfImageInfo>\n");
        for (name, width, height) in entries {
            xml.push_str(&format!(
                "  <ImageInfo><Name>{name}</Name><Width>{width}</Width><Height>{height}</Height></ImageInfo>\n"
            ));
        }
        xml.push_str("</ArrayOfImageInfo>\n");
        fs::write(self.catalog_path(), xml).expect("write catalog");
    }

    /// Write arbitrary bytes as the catalog file.
    pub fn write_raw_catalog(&self, text: &str) {
        fs::write(self.catalog_path(), text).expect("write catalog");
    }

    /// Write a solid-gray full image under `Images/FullImages/`.
    pub fn write_full_image(&self, name: &str, width: u32, height: u32, value: u8) {
        let dir = self.root().join(FULL_IMAGE_DIR);
        fs::create_dir_all(&dir).expect("create full image dir");
        let img = RgbImage::from_pixel(width, height, Rgb([value, value, value]));
        img.save(dir.join(format!("{name}.jpg"))).expect("write jpeg");
    }

    /// Cut and write the complete tile grid for one level of detail.
    ///
    /// Each tile is a solid color derived from its grid cell (see
    /// [`tile_color`]), so composited output can be probed per cell. Edge
    /// tiles are written at their true clipped size.
    pub fn write_tiles(&self, name: &str, width: u32, height: u32, tile_size: u32, scale: f32) {
        let dir = self.root().join(TILE_DIR);
        fs::create_dir_all(&dir).expect("create tile dir");
        let bucket = scale_bucket(scale);

        // Stored pixel dimensions of this level.
        let level_width = (width as f32 * scale).round() as u32;
        let level_height = (height as f32 * scale).round() as u32;
        let cols = level_width.div_ceil(tile_size);
        let rows = level_height.div_ceil(tile_size);

        for row in 0..rows {
            for col in 0..cols {
                let tile_width = (level_width - col * tile_size).min(tile_size);
                let tile_height = (level_height - row * tile_size).min(tile_size);
                let img = RgbaImage::from_pixel(tile_width, tile_height, tile_color(col, row));
                img.save(dir.join(format!("{name}_{bucket}_{col}_{row}.png")))
                    .expect("write tile");
            }
        }
    }

    /// Delete a single tile asset.
    pub fn remove_tile(&self, name: &str, scale: f32, col: u32, row: u32) {
        let bucket = scale_bucket(scale);
        let path = self
            .root()
            .join(TILE_DIR)
            .join(format!("{name}_{bucket}_{col}_{row}.png"));
        fs::remove_file(path).expect("remove tile");
    }
}

/// Deterministic per-cell tile color.
pub fn tile_color(col: u32, row: u32) -> Rgba<u8> {
    Rgba([40 + (col as u8) * 40, 40 + (row as u8) * 40, 200, 255])
}

/// Assert an exact pixel value in a rendered buffer.
pub fn assert_pixel(image: &RgbaImage, x: u32, y: u32, expected: Rgba<u8>) {
    let actual = *image.get_pixel(x, y);
    assert_eq!(
        actual, expected,
        "pixel ({x}, {y}) is {actual:?}, expected {expected:?}"
    );
}
