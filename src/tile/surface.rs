//! Tile grid addressing and region drawing for one tiled image.
//!
//! A [`TiledSurface`] never holds pixel data. It knows an image's identity,
//! its full-resolution size, the nominal tile size, and how many levels of
//! detail were pre-rendered; redraws arrive as a rectangle in
//! full-resolution content coordinates plus the backend's current draw
//! scale, and the surface resolves and places the intersecting tiles.

use tracing::trace;

use crate::geometry::{Rect, Size};
use crate::render::Canvas;
use crate::tile::TileResolver;

/// Nominal tile edge, in full-resolution pixels at the 1:1 level.
pub const DEFAULT_TILE_SIZE: f32 = 256.0;

/// Number of pre-rendered zoom buckets.
pub const DEFAULT_LEVELS_OF_DETAIL: u32 = 4;

// =============================================================================
// TilePlacement
// =============================================================================

/// One addressed grid cell and the rectangle its tile is drawn into.
///
/// The rectangle is already clipped to the surface bounds, so partial tiles
/// along the right and bottom edges are placed at their true size instead of
/// being stretched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub col: i32,
    pub row: i32,
    pub rect: Rect,
}

// =============================================================================
// TiledSurface
// =============================================================================

/// A zoomable image rendered from pre-cut tiles instead of one bitmap.
#[derive(Debug, Clone)]
pub struct TiledSurface {
    image_name: String,
    native_size: Size,
    tile_size: Size,
    levels_of_detail: u32,
    annotates: bool,
}

impl TiledSurface {
    /// Create a surface with the default tile geometry (256px tiles, 4
    /// levels of detail).
    pub fn new(image_name: impl Into<String>, native_size: Size) -> Self {
        Self::with_geometry(
            image_name,
            native_size,
            Size::new(DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE),
            DEFAULT_LEVELS_OF_DETAIL,
        )
    }

    /// Create a surface with explicit tile size and level count.
    pub fn with_geometry(
        image_name: impl Into<String>,
        native_size: Size,
        tile_size: Size,
        levels_of_detail: u32,
    ) -> Self {
        Self {
            image_name: image_name.into(),
            native_size,
            tile_size,
            levels_of_detail,
            annotates: false,
        }
    }

    /// Enable or disable the debug tile grid (each placement stroked).
    pub fn with_annotations(mut self, annotates: bool) -> Self {
        self.annotates = annotates;
        self
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn native_size(&self) -> Size {
        self.native_size
    }

    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    pub fn levels_of_detail(&self) -> u32 {
        self.levels_of_detail
    }

    pub fn annotates(&self) -> bool {
        self.annotates
    }

    /// The surface's own bounds in content coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.native_size)
    }

    /// The pre-rendered level the backend should draw at for a zoom factor.
    ///
    /// Levels are powers of two: 1, 1/2, 1/4, ... down to
    /// `2^-(levels_of_detail - 1)`. The largest level scale not exceeding
    /// the zoom is chosen; below the coarsest level the coarsest is reused
    /// and its tiles stretch (increasingly blurry output, which the display
    /// compositor scales back down anyway).
    pub fn level_scale_for_zoom(&self, zoom: f32) -> f32 {
        let coarsest = -(self.levels_of_detail.saturating_sub(1) as i32);
        if !zoom.is_finite() || zoom <= 0.0 {
            return (coarsest as f32).exp2();
        }
        if zoom >= 1.0 {
            return 1.0;
        }
        let level = zoom.log2().floor() as i32;
        (level.max(coarsest) as f32).exp2()
    }

    /// Address the tiles intersecting `rect` at the given draw scale.
    ///
    /// `rect` is in full-resolution content coordinates even when the draw
    /// scale is below 1: one tile at scale 0.5 covers twice the content span
    /// of a tile at scale 1, so the nominal tile size is divided by the
    /// scale before the grid walk.
    pub fn tiles_in_rect(&self, rect: Rect, scale: f32) -> Vec<TilePlacement> {
        if rect.is_empty() || scale <= 0.0 || self.native_size.is_empty() {
            return Vec::new();
        }

        let bounds = self.bounds();
        let tile_w = self.tile_size.width / scale;
        let tile_h = self.tile_size.height / scale;

        let first_col = (rect.min_x() / tile_w).floor() as i32;
        let last_col = ((rect.max_x() - 1.0) / tile_w).floor() as i32;
        let first_row = (rect.min_y() / tile_h).floor() as i32;
        let last_row = ((rect.max_y() - 1.0) / tile_h).floor() as i32;

        let mut placements = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let cell = Rect::new(col as f32 * tile_w, row as f32 * tile_h, tile_w, tile_h);
                let placement = cell.intersect(&bounds);
                if placement.is_empty() {
                    continue;
                }
                placements.push(TilePlacement {
                    col,
                    row,
                    rect: placement,
                });
            }
        }
        placements
    }

    /// Draw the tiles intersecting `rect` into the canvas.
    ///
    /// The draw scale comes from the canvas transform and is assumed uniform
    /// in both axes. A cell whose tile cannot be resolved stays undrawn; the
    /// rest of the region still renders.
    pub fn draw_region<C, R>(&self, canvas: &mut C, rect: Rect, resolver: &mut R)
    where
        C: Canvas,
        R: TileResolver + ?Sized,
    {
        let scale = canvas.content_scale();
        for placement in self.tiles_in_rect(rect, scale) {
            let Some(tile) =
                resolver.resolve_tile(&self.image_name, scale, placement.col, placement.row)
            else {
                trace!(
                    image = %self.image_name,
                    col = placement.col,
                    row = placement.row,
                    scale,
                    "no tile for cell"
                );
                continue;
            };

            canvas.draw_image(&tile, placement.rect);
            if self.annotates {
                canvas.stroke_rect(placement.rect, 6.0 / scale);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
