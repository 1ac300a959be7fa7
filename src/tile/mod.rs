//! Tile layer: level-of-detail tile addressing, resolution, and caching.
//!
//! # Architecture
//!
//! The tile layer sits between a zoomable page and the asset store:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        ZoomableView (one page)          │
//! └────────────────────┬────────────────────┘
//!                      │ redraw rect + scale
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             TiledSurface                │
//! │   (addresses the tile grid, draws)      │
//! └────────────────────┬────────────────────┘
//!                      │ (image, scale, col, row)
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           TileResolver trait            │
//! └──────────┬───────────────────┬──────────┘
//!            ▼                   ▼
//! ┌─────────────────┐   ┌──────────────────┐
//! │   TileCache     │──▶│   AssetStore     │
//! │ (LRU, decoded)  │   │ (uncached disk)  │
//! └─────────────────┘   └──────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TiledSurface`]: tile grid addressing and region drawing for one image
//! - [`TilePlacement`]: one addressed cell and its clipped placement rect
//! - [`TileResolver`]: seam between drawing and tile storage
//! - [`TileCache`]: LRU cache of decoded tiles with a byte-size budget
//! - [`TileKey`]: composite identity (image, scale bucket, col, row)
//! - [`CachingResolver`]: cache-in-front-of-store resolver for redraws

use std::sync::Arc;

use image::RgbaImage;

mod cache;
mod surface;

pub use cache::{CachingResolver, TileCache, TileKey, DEFAULT_TILE_CACHE_CAPACITY};
pub use surface::{TilePlacement, TiledSurface, DEFAULT_LEVELS_OF_DETAIL, DEFAULT_TILE_SIZE};

/// Maps a tile identity to a decoded bitmap, or `None` when the tile does
/// not exist.
///
/// Implemented uncached by [`AssetStore`](crate::store::AssetStore) and with
/// an LRU layer by [`TileCache`]. Absence is a per-cell condition, never an
/// error: the surface leaves the cell undrawn and carries on.
pub trait TileResolver {
    fn resolve_tile(
        &mut self,
        image_name: &str,
        scale: f32,
        col: i32,
        row: i32,
    ) -> Option<Arc<RgbaImage>>;
}
