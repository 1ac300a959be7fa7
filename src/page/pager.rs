//! The paging controller: visible-range computation, slot recycling, and
//! the rotation protocol.
//!
//! The pager tracks a horizontal scroll viewport whose origin is the scroll
//! offset. Every scroll signal retiles: slots whose index left the needed
//! range move to the recycle pool, and every needed index gets a slot,
//! reused from the pool when one is available or freshly allocated.
//!
//! Rotation is a two-state protocol. Before the bounds change the pager
//! snapshots which page the viewport sits on and how far into it; after the
//! bounds change it reframes every visible page (preserving each page's
//! zoom anchor) and translates the snapshot into the new page width.

use std::ops::RangeInclusive;

use tracing::{debug, trace};

use crate::catalog::{Catalog, ImageInfo};
use crate::geometry::{Rect, Size};
use crate::page::{PageContent, PageSlot, SingleImage, ZoomableView};
use crate::tile::{TiledSurface, DEFAULT_LEVELS_OF_DETAIL, DEFAULT_TILE_SIZE};

/// Default display pixel density (content pixels per point).
pub const DEFAULT_DEVICE_SCALE: f32 = 2.0;

// =============================================================================
// Options
// =============================================================================

/// How a page presents its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Multi-resolution tiles; memory stays bounded for very large images
    #[default]
    Tiled,

    /// The full bitmap decoded at once
    FullImage,
}

/// Tuning knobs for the pager and the surfaces it configures.
#[derive(Debug, Clone, Copy)]
pub struct PagerOptions {
    /// Display pixel density, used for the max-zoom bound
    pub device_scale: f32,

    /// Nominal tile size handed to tiled surfaces
    pub tile_size: Size,

    /// Pre-rendered level-of-detail count
    pub levels_of_detail: u32,

    /// Stroke tile boundaries (debug aid)
    pub annotate_tiles: bool,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            device_scale: DEFAULT_DEVICE_SCALE,
            tile_size: Size::new(DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE),
            levels_of_detail: DEFAULT_LEVELS_OF_DETAIL,
            annotate_tiles: false,
        }
    }
}

// =============================================================================
// Visible range
// =============================================================================

/// The page indices a viewport needs, as a clamped inclusive range.
///
/// `first = floor(min_x / page_width)` and
/// `last = floor((max_x - 1) / page_width)`, both clamped to
/// `[0, page_count - 1]`. `None` means no page is needed: an empty catalog,
/// a degenerate page width, or a viewport narrower than one content pixel.
pub fn visible_page_range(
    min_x: f32,
    max_x: f32,
    page_width: f32,
    page_count: usize,
) -> Option<RangeInclusive<usize>> {
    if page_count == 0 || page_width <= 0.0 {
        return None;
    }

    let last_page = (page_count - 1) as i64;
    let first = ((min_x / page_width).floor() as i64).clamp(0, last_page);
    let last = (((max_x - 1.0) / page_width).floor() as i64).clamp(0, last_page);

    if last < first {
        return None;
    }
    Some(first as usize..=last as usize)
}

// =============================================================================
// Pager
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum RotationState {
    Stable,
    Rotating { first_index: usize, fraction: f32 },
}

/// Owns the visible page slots and the recycle pool, and keeps the visible
/// set equal to the viewport's needed index range.
#[derive(Debug)]
pub struct Pager {
    catalog: Catalog,
    mode: DisplayMode,
    options: PagerOptions,

    /// Paging viewport; the origin's x is the scroll offset.
    bounds: Rect,

    visible: Vec<PageSlot>,
    recycled: Vec<PageSlot>,
    rotation: RotationState,
}

impl Pager {
    /// Create a pager with default options and tile the initial viewport.
    pub fn new(catalog: Catalog, viewport: Size, mode: DisplayMode) -> Self {
        Self::with_options(catalog, viewport, mode, PagerOptions::default())
    }

    /// Create a pager with explicit options and tile the initial viewport.
    pub fn with_options(
        catalog: Catalog,
        viewport: Size,
        mode: DisplayMode,
        options: PagerOptions,
    ) -> Self {
        let mut pager = Self {
            catalog,
            mode,
            options,
            bounds: Rect::from_size(viewport),
            visible: Vec::new(),
            recycled: Vec::new(),
            rotation: RotationState::Stable,
        };
        pager.retile();
        pager
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Total number of pages (catalog length).
    pub fn page_count(&self) -> usize {
        self.catalog.len()
    }

    /// The paging viewport, origin at the scroll offset.
    pub fn viewport(&self) -> Rect {
        self.bounds
    }

    /// Current horizontal scroll offset.
    pub fn offset(&self) -> f32 {
        self.bounds.min_x()
    }

    /// Total scrollable extent: pages laid out left to right, no overlap.
    pub fn content_extent(&self) -> Size {
        Size::new(
            self.bounds.width() * self.page_count() as f32,
            self.bounds.height(),
        )
    }

    /// Frame of page `index`: `x = page_width * index`, full height.
    pub fn frame_for_page(&self, index: usize) -> Rect {
        Rect::new(
            self.bounds.width() * index as f32,
            0.0,
            self.bounds.width(),
            self.bounds.height(),
        )
    }

    /// Scroll signal from the backend: move the viewport and retile.
    pub fn scrolled(&mut self, offset_x: f32) {
        self.bounds.origin.x = offset_x;
        self.retile();
    }

    /// Bring the visible set in line with the viewport.
    ///
    /// Postcondition: exactly one slot per index in the needed range, every
    /// slot that left the range parked in the recycle pool.
    pub fn retile(&mut self) {
        let range = visible_page_range(
            self.bounds.min_x(),
            self.bounds.max_x(),
            self.bounds.width(),
            self.page_count(),
        );

        // Recycle pages that scrolled out of the needed range.
        let mut i = 0;
        while i < self.visible.len() {
            let index = self.visible[i].index;
            if range.as_ref().is_some_and(|r| r.contains(&index)) {
                i += 1;
            } else {
                let slot = self.visible.swap_remove(i);
                trace!(index = slot.index, "recycling page");
                self.recycled.push(slot);
            }
        }

        // Add missing pages, reusing pooled slots where possible.
        let Some(range) = range else {
            return;
        };
        for index in range {
            if self.is_displaying(index) {
                continue;
            }
            // The range is clamped to the catalog, so the lookup holds by
            // construction.
            let Some(info) = self.catalog.get(index).cloned() else {
                continue;
            };

            let mut slot = match self.recycled.pop() {
                Some(slot) => slot,
                None => {
                    debug!(index, "allocating page slot");
                    PageSlot::new(ZoomableView::new(
                        self.bounds.size,
                        self.options.device_scale,
                    ))
                }
            };
            self.configure(&mut slot, index, &info);
            self.visible.push(slot);
        }
    }

    /// Whether a slot for `index` is currently visible.
    pub fn is_displaying(&self, index: usize) -> bool {
        self.visible.iter().any(|slot| slot.index == index)
    }

    /// Slots currently attached to the viewport, in no particular order.
    pub fn visible_pages(&self) -> &[PageSlot] {
        &self.visible
    }

    /// The visible slot for `index`, if any.
    pub fn page_at(&self, index: usize) -> Option<&PageSlot> {
        self.visible.iter().find(|slot| slot.index == index)
    }

    pub fn page_at_mut(&mut self, index: usize) -> Option<&mut PageSlot> {
        self.visible.iter_mut().find(|slot| slot.index == index)
    }

    /// Number of slots parked in the recycle pool.
    pub fn recycled_count(&self) -> usize {
        self.recycled.len()
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.rotation, RotationState::Rotating { .. })
    }

    /// Start-of-rotation signal: snapshot the scroll position as a page
    /// index plus a fraction of a page, before the bounds change.
    ///
    /// A negative offset (bounce past the first page) pins the index to 0
    /// and keeps the fraction's sign so the bounce survives rotation.
    pub fn begin_rotation(&mut self) {
        let page_width = self.bounds.width();
        let offset = self.bounds.min_x();

        let (first_index, fraction) = if page_width <= 0.0 {
            (0, 0.0)
        } else if offset >= 0.0 {
            let first_index = (offset / page_width).floor() as usize;
            (
                first_index,
                (offset - first_index as f32 * page_width) / page_width,
            )
        } else {
            (0, offset / page_width)
        };

        self.rotation = RotationState::Rotating {
            first_index,
            fraction,
        };
    }

    /// Rotation-animation signal: adopt the new viewport size, reframe every
    /// visible page around its captured anchor, and translate the scroll
    /// snapshot into the new page width. Ends in the stable state.
    pub fn finish_rotation(&mut self, new_viewport: Size) {
        self.bounds.size = new_viewport;

        for slot in &mut self.visible {
            let restore = slot.view.capture_restore_point();
            slot.frame = Rect::new(
                new_viewport.width * slot.index as f32,
                0.0,
                new_viewport.width,
                new_viewport.height,
            );
            slot.view.set_bounds(slot.frame.size);
            slot.view.restore(restore);
        }

        if let RotationState::Rotating {
            first_index,
            fraction,
        } = self.rotation
        {
            self.bounds.origin.x = (first_index as f32 + fraction) * new_viewport.width;
        }
        self.rotation = RotationState::Stable;
    }

    fn configure(&self, slot: &mut PageSlot, index: usize, info: &ImageInfo) {
        slot.index = index;
        slot.frame = self.frame_for_page(index);
        slot.view.set_bounds(slot.frame.size);

        let content = match self.mode {
            DisplayMode::Tiled => PageContent::Tiled(
                TiledSurface::with_geometry(
                    info.name.clone(),
                    info.size(),
                    self.options.tile_size,
                    self.options.levels_of_detail,
                )
                .with_annotations(self.options.annotate_tiles),
            ),
            DisplayMode::FullImage => PageContent::Single(SingleImage {
                name: info.name.clone(),
                size: info.size(),
            }),
        };
        slot.view.set_content(content);
    }
}

// =============================================================================
// Tests
// =============================================================================
