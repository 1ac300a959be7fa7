//! Rendering-backend seam and a software implementation of it.
//!
//! The engine never talks to a real compositor; it draws through the
//! [`Canvas`] trait, which exposes exactly what the tile-drawing path
//! needs: the current draw-to-content scale, image placement, and a debug
//! stroke. [`Pixmap`] implements the trait over an RGBA buffer so the
//! whole path (zoom fit, tile addressing, tile resolution, placement) can
//! run headless in the CLI and in tests.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::AssetError;
use crate::geometry::{Point, Rect, Size};
use crate::page::SingleImage;
use crate::store::AssetStore;
use crate::tile::{TileResolver, TiledSurface};

/// Stroke color for tile annotations.
const ANNOTATION_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

// =============================================================================
// Canvas trait
// =============================================================================

/// Drawing surface the tiled path renders into.
///
/// Coordinates are full-resolution content coordinates; the canvas carries
/// the active transform's uniform scale and maps placements to device
/// pixels itself.
pub trait Canvas {
    /// Uniform draw-to-content scale of the active transform.
    fn content_scale(&self) -> f32;

    /// Draw `image` stretched into `dest` (content coordinates).
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    /// Stroke the boundary of `rect` at `line_width` content units.
    fn stroke_rect(&mut self, rect: Rect, line_width: f32);
}

// =============================================================================
// Pixmap
// =============================================================================

/// Software canvas: an RGBA buffer covering a content region at a fixed
/// draw scale.
pub struct Pixmap {
    pixels: RgbaImage,
    origin: Point,
    scale: f32,
}

impl Pixmap {
    /// A black pixmap covering `region` (content coordinates) at `scale`
    /// pixels per content unit.
    pub fn covering(region: Rect, scale: f32) -> Self {
        let width = (region.width() * scale).ceil().max(1.0) as u32;
        let height = (region.height() * scale).ceil().max(1.0) as u32;
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            origin: region.origin,
            scale,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Map a content rect to pixel edges relative to this pixmap.
    fn pixel_rect(&self, rect: Rect) -> (i64, i64, i64, i64) {
        let x0 = ((rect.min_x() - self.origin.x) * self.scale).round() as i64;
        let y0 = ((rect.min_y() - self.origin.y) * self.scale).round() as i64;
        let x1 = ((rect.max_x() - self.origin.x) * self.scale).round() as i64;
        let y1 = ((rect.max_y() - self.origin.y) * self.scale).round() as i64;
        (x0, y0, x1, y1)
    }

    /// Fill a pixel-space rectangle, clipped to the buffer.
    fn fill(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
        let width = self.pixels.width() as i64;
        let height = self.pixels.height() as i64;
        let x0 = x0.clamp(0, width);
        let x1 = x1.clamp(0, width);
        let y0 = y0.clamp(0, height);
        let y1 = y1.clamp(0, height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

impl Canvas for Pixmap {
    fn content_scale(&self) -> f32 {
        self.scale
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        let (x0, y0, x1, y1) = self.pixel_rect(dest);
        let width = (x1 - x0).max(0) as u32;
        let height = (y1 - y0).max(0) as u32;
        if width == 0 || height == 0 {
            return;
        }

        if image.width() == width && image.height() == height {
            imageops::overlay(&mut self.pixels, image, x0, y0);
        } else {
            let resized = imageops::resize(image, width, height, FilterType::Triangle);
            imageops::overlay(&mut self.pixels, &resized, x0, y0);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: f32) {
        let (x0, y0, x1, y1) = self.pixel_rect(rect);
        let lw = ((line_width * self.scale).round() as i64).max(1);

        self.fill(x0, y0, x1, y0 + lw, ANNOTATION_COLOR); // top
        self.fill(x0, y1 - lw, x1, y1, ANNOTATION_COLOR); // bottom
        self.fill(x0, y0, x0 + lw, y1, ANNOTATION_COLOR); // left
        self.fill(x1 - lw, y0, x1, y1, ANNOTATION_COLOR); // right
    }
}

// =============================================================================
// Offline page rendering
// =============================================================================

/// Render the tiles of `surface` intersecting `region` at `draw_scale`.
///
/// The returned pixmap covers `region ∩ surface bounds`; cells without a
/// resolvable tile stay at the background color.
pub fn render_tiled<R>(
    surface: &TiledSurface,
    region: Rect,
    draw_scale: f32,
    resolver: &mut R,
) -> Pixmap
where
    R: TileResolver + ?Sized,
{
    let region = region.intersect(&surface.bounds());
    let mut canvas = Pixmap::covering(region, draw_scale);
    surface.draw_region(&mut canvas, region, resolver);
    canvas
}

/// Render a full-image page region by cropping the decoded bitmap.
///
/// `region` is in content coordinates (1:1 with full-image pixels);
/// `output_scale` sets the output resolution in pixels per content unit.
pub fn render_full_image(
    store: &AssetStore,
    image: &SingleImage,
    region: Rect,
    output_scale: f32,
) -> Result<RgbaImage, AssetError> {
    let full = store.load_full_image(&image.name)?;
    let bounds = Rect::from_size(Size::new(full.width() as f32, full.height() as f32));
    let crop = region.intersect(&bounds);
    if crop.is_empty() {
        return Ok(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])));
    }

    let sub = imageops::crop_imm(
        &full,
        crop.min_x() as u32,
        crop.min_y() as u32,
        crop.width().ceil() as u32,
        crop.height().ceil() as u32,
    )
    .to_image();

    let out_width = (crop.width() * output_scale).round().max(1.0) as u32;
    let out_height = (crop.height() * output_scale).round().max(1.0) as u32;
    Ok(imageops::resize(&sub, out_width, out_height, FilterType::Triangle))
}

// =============================================================================
// Tests
// =============================================================================
