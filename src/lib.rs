//! # Photo Pager
//!
//! The engine behind a horizontally paged, zoomable photo gallery: page-slot
//! recycling driven by a scroll viewport, fit-to-viewport zoom math with
//! rotation-safe capture/restore, and level-of-detail tile addressing for
//! images too large to decode whole.
//!
//! The crate is deliberately UI-framework free. The host's scroll view,
//! gesture handling, and compositor stay outside; they talk to the engine
//! through scroll/rotation/redraw signals and two narrow seams, a
//! [`Canvas`](render::Canvas) to draw into and a
//! [`TileResolver`](tile::TileResolver) to fetch tiles from. A software
//! canvas is included so the full drawing path runs headless.
//!
//! ## Architecture
//!
//! - [`geometry`] - float points, sizes, and rectangles
//! - [`catalog`] - the XML-backed ordered image list (page identity)
//! - [`store`] - filesystem asset lookup with fixed path conventions
//! - [`page`] - zoomable pages and the recycling paginator
//! - [`tile`] - tiled surfaces, tile resolution, and the decoded-tile cache
//! - [`render`] - the rendering-backend seam and the software pixmap
//! - [`config`] - CLI types for the bundled tool
//!
//! Everything runs on one thread: scroll and redraw signals are delivered
//! by the host's event loop, and no operation blocks or suspends.
//!
//! ## Example
//!
//! ```rust,no_run
//! use photo_pager::catalog::Catalog;
//! use photo_pager::geometry::Size;
//! use photo_pager::page::{DisplayMode, Pager};
//! use std::path::Path;
//!
//! // Load the catalog; a broken catalog degrades to an empty gallery.
//! let catalog = Catalog::load_or_empty(Path::new("gallery/ImageData.xml"));
//!
//! // One pager per gallery view.
//! let mut pager = Pager::new(catalog, Size::new(320.0, 480.0), DisplayMode::Tiled);
//!
//! // Scroll signals keep the visible slot set in sync.
//! pager.scrolled(480.0);
//! for slot in pager.visible_pages() {
//!     println!("page {} at {:?}", slot.index(), slot.frame());
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod page;
pub mod render;
pub mod store;
pub mod tile;

// Re-export commonly used types
pub use catalog::{Catalog, ImageInfo, CATALOG_FILE};
pub use config::{CheckConfig, Cli, Command, InfoConfig, RenderConfig};
pub use error::{AssetError, CatalogError, RenderError};
pub use geometry::{Point, Rect, Size};
pub use page::{
    visible_page_range, zoom_bounds, DisplayMode, PageContent, PageSlot, Pager, PagerOptions,
    RestorePoint, SingleImage, ZoomableView, DEFAULT_DEVICE_SCALE,
};
pub use render::{render_full_image, render_tiled, Canvas, Pixmap};
pub use store::{scale_bucket, AssetStore, FULL_IMAGE_DIR, TILE_DIR};
pub use tile::{
    CachingResolver, TileCache, TileKey, TilePlacement, TileResolver, TiledSurface,
    DEFAULT_LEVELS_OF_DETAIL, DEFAULT_TILE_CACHE_CAPACITY, DEFAULT_TILE_SIZE,
};
