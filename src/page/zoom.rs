//! Zoom-capable page viewport.
//!
//! A [`ZoomableView`] wraps one page's content and keeps the zoom scale
//! within fit-derived bounds, centers undersized content, and can capture
//! and restore its visual anchor across a bounds change (device rotation).
//!
//! Coordinate model: the view scrolls over its content with a top-left
//! `offset` in viewport coordinates. The stored content size stays at the
//! unscaled logical size; the rendering backend applies the zoom transform,
//! so offset clamping works against the unscaled extent.

use crate::geometry::{Point, Rect, Size};
use crate::page::PageContent;

/// Fit-zoom bounds for content inside a viewport.
///
/// The minimum is the scale that makes the content fully visible; the
/// maximum maps one content pixel to one physical display pixel
/// (`1 / device_scale`). A small image is never forced to zoom past
/// pixel-for-pixel: when the fit scale exceeds the maximum, both collapse
/// to the maximum, so `min <= max` always holds.
pub fn zoom_bounds(viewport: Size, content: Size, device_scale: f32) -> (f32, f32) {
    let max_scale = 1.0 / device_scale;
    if content.is_empty() {
        return (max_scale, max_scale);
    }

    let x_scale = viewport.width / content.width;
    let y_scale = viewport.height / content.height;
    let mut min_scale = x_scale.min(y_scale);

    if min_scale > max_scale {
        min_scale = max_scale;
    }
    (min_scale, max_scale)
}

// =============================================================================
// RestorePoint
// =============================================================================

/// Visual anchor captured before a bounds change.
///
/// `center` is the viewport's center translated into content coordinates.
/// `scale` is the zoom at capture time, except that a view sitting at its
/// minimum zoom reports `0.0`: the sentinel means "track the minimum,
/// whatever it becomes under the new bounds".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestorePoint {
    pub center: Point,
    pub scale: f32,
}

// =============================================================================
// ZoomableView
// =============================================================================

/// One page's zoomable viewport over a single or tiled image.
#[derive(Debug)]
pub struct ZoomableView {
    bounds: Size,
    device_scale: f32,
    content: Option<PageContent>,
    content_size: Size,
    content_origin: Point,
    offset: Point,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl ZoomableView {
    /// Create an empty view for a viewport of the given size.
    pub fn new(bounds: Size, device_scale: f32) -> Self {
        let max_scale = 1.0 / device_scale;
        Self {
            bounds,
            device_scale,
            content: None,
            content_size: Size::ZERO,
            content_origin: Point::ZERO,
            offset: Point::ZERO,
            zoom: 1.0,
            min_zoom: max_scale,
            max_zoom: max_scale,
        }
    }

    /// Display new content.
    ///
    /// Any previous content is released by replacement. The zoom resets to
    /// 1.0 before the bounds math runs, then settles at the new minimum so
    /// the image starts fully visible.
    pub fn set_content(&mut self, content: PageContent) {
        self.content_size = content.native_size();
        self.content = Some(content);
        self.zoom = 1.0;
        self.offset = Point::ZERO;
        self.update_zoom_bounds();
        self.zoom = self.min_zoom;
        self.layout();
    }

    /// Resize the viewport, recomputing zoom bounds and re-centering.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.update_zoom_bounds();
        self.zoom = self.zoom.max(self.min_zoom).min(self.max_zoom);
        self.layout();
    }

    /// Set the zoom scale, clamped to the current bounds.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(self.min_zoom).min(self.max_zoom);
        self.layout();
    }

    /// Set the scroll offset, clamped to the scrollable extent.
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = self.clamp_offset(offset);
    }

    /// Capture the current visual anchor for a later [`restore`](Self::restore).
    pub fn capture_restore_point(&self) -> RestorePoint {
        let bounds_center = Point::new(
            self.offset.x + self.bounds.width / 2.0,
            self.offset.y + self.bounds.height / 2.0,
        );
        let center = Point::new(
            (bounds_center.x - self.content_origin.x) / self.zoom,
            (bounds_center.y - self.content_origin.y) / self.zoom,
        );

        // At the minimum zoom, report the sentinel instead of the literal
        // scale so the restored view snaps to the new minimum.
        let scale = if self.zoom <= self.min_zoom + f32::EPSILON {
            0.0
        } else {
            self.zoom
        };

        RestorePoint { center, scale }
    }

    /// Re-apply a captured anchor under the current bounds.
    ///
    /// The zoom is applied before the offset: the offset clamp depends on
    /// the zoomed layout, so the order is load-bearing.
    pub fn restore(&mut self, point: RestorePoint) {
        // Step 1: restore the zoom scale within the allowable range. The
        // 0.0 sentinel lands on the minimum via the lower clamp.
        self.zoom = point.scale.max(self.min_zoom).min(self.max_zoom);
        self.layout();

        // Step 2: translate the content-space center back to viewport
        // coordinates, derive the top-left offset, and clamp it.
        let bounds_center = Point::new(
            point.center.x * self.zoom + self.content_origin.x,
            point.center.y * self.zoom + self.content_origin.y,
        );
        let offset = Point::new(
            bounds_center.x - self.bounds.width / 2.0,
            bounds_center.y - self.bounds.height / 2.0,
        );
        self.offset = self.clamp_offset(offset);
    }

    /// The content region under the viewport, in content coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            (self.offset.x - self.content_origin.x) / self.zoom,
            (self.offset.y - self.content_origin.y) / self.zoom,
            self.bounds.width / self.zoom,
            self.bounds.height / self.zoom,
        )
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn device_scale(&self) -> f32 {
        self.device_scale
    }

    pub fn content(&self) -> Option<&PageContent> {
        self.content.as_ref()
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Centering origin of the scaled content within the viewport.
    pub fn content_origin(&self) -> Point {
        self.content_origin
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    fn update_zoom_bounds(&mut self) {
        let (min_zoom, max_zoom) = zoom_bounds(self.bounds, self.content_size, self.device_scale);
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
    }

    /// Center the content on each axis where it is smaller than the
    /// viewport; align to the origin where it is not.
    fn layout(&mut self) {
        let scaled_width = self.content_size.width * self.zoom;
        let scaled_height = self.content_size.height * self.zoom;

        self.content_origin.x = if scaled_width < self.bounds.width {
            (self.bounds.width - scaled_width) / 2.0
        } else {
            0.0
        };
        self.content_origin.y = if scaled_height < self.bounds.height {
            (self.bounds.height - scaled_height) / 2.0
        } else {
            0.0
        };
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        let max_x = self.content_size.width - self.bounds.width;
        let max_y = self.content_size.height - self.bounds.height;
        Point::new(
            offset.x.min(max_x).max(0.0),
            offset.y.min(max_y).max(0.0),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
