//! Page layer: zoomable pages and the recycling paginator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                  Pager                  │
//! │   visible slots ←→ recycle pool         │
//! └────────────────────┬────────────────────┘
//!                      │ one slot per visible index
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │         PageSlot (frame + view)         │
//! └────────────────────┬────────────────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │    ZoomableView (zoom bounds, offset)   │
//! │    content: Single │ Tiled              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The pager owns every slot it ever creates: slots move between the
//! visible list and the recycle pool but never escape. Content is a tagged
//! union rather than a trait object; both variants are descriptors whose
//! pixels are resolved at draw time.

mod pager;
mod zoom;

pub use pager::{visible_page_range, DisplayMode, Pager, PagerOptions, DEFAULT_DEVICE_SCALE};
pub use zoom::{zoom_bounds, RestorePoint, ZoomableView};

use crate::geometry::{Rect, Size};
use crate::tile::TiledSurface;

// =============================================================================
// Page content
// =============================================================================

/// A full image displayed as one bitmap, sized from the catalog's declared
/// dimensions. Pixels load uncached when drawn.
#[derive(Debug, Clone)]
pub struct SingleImage {
    pub name: String,
    pub size: Size,
}

/// What a page displays inside its zoomable viewport.
#[derive(Debug, Clone)]
pub enum PageContent {
    /// The whole image decoded at once
    Single(SingleImage),

    /// A level-of-detail tiled rendition for large images
    Tiled(TiledSurface),
}

impl PageContent {
    /// Full-resolution size of the content.
    pub fn native_size(&self) -> Size {
        match self {
            PageContent::Single(image) => image.size,
            PageContent::Tiled(surface) => surface.native_size(),
        }
    }

    /// Catalog name of the underlying image.
    pub fn image_name(&self) -> &str {
        match self {
            PageContent::Single(image) => &image.name,
            PageContent::Tiled(surface) => surface.image_name(),
        }
    }
}

// =============================================================================
// Page slot
// =============================================================================

/// One reusable page: an index, a frame in paging coordinates, and the
/// zoomable view showing the content.
///
/// Slots are created and owned by the [`Pager`]; a recycled slot keeps its
/// view allocation and is reconfigured in place when it comes back.
#[derive(Debug)]
pub struct PageSlot {
    pub(crate) index: usize,
    pub(crate) frame: Rect,
    pub(crate) view: ZoomableView,
}

impl PageSlot {
    pub(crate) fn new(view: ZoomableView) -> Self {
        Self {
            index: 0,
            frame: Rect::ZERO,
            view,
        }
    }

    /// Catalog index this slot currently displays.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Frame within the paging scroll extent.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn view(&self) -> &ZoomableView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ZoomableView {
        &mut self.view
    }
}
