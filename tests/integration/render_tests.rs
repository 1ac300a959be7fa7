//! Tile compositing and full-image rendering against real on-disk assets.

use image::Rgba;

use photo_pager::catalog::Catalog;
use photo_pager::geometry::{Rect, Size};
use photo_pager::page::{DisplayMode, PageContent, Pager, SingleImage};
use photo_pager::render::{render_full_image, render_tiled};
use photo_pager::store::AssetStore;
use photo_pager::tile::{CachingResolver, TileResolver, TiledSurface};

use super::test_utils::{assert_pixel, tile_color, GalleryFixture};

const VIEWPORT: Size = Size {
    width: 320.0,
    height: 480.0,
};

#[test]
fn test_tiled_render_composites_grid_from_disk() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 1000, 800, 256, 1.0);

    let surface = TiledSurface::new("alpha", Size::new(1000.0, 800.0));
    let mut store = AssetStore::new(fixture.root());
    let pixmap = render_tiled(&surface, surface.bounds(), 1.0, &mut store);

    let output = pixmap.into_image();
    assert_eq!(output.dimensions(), (1000, 800));

    // One probe per interior cell.
    assert_pixel(&output, 100, 100, tile_color(0, 0));
    assert_pixel(&output, 300, 100, tile_color(1, 0));
    assert_pixel(&output, 100, 300, tile_color(0, 1));
    assert_pixel(&output, 600, 600, tile_color(2, 2));
    // Clipped edge cell.
    assert_pixel(&output, 990, 790, tile_color(3, 3));
}

#[test]
fn test_tiled_render_at_half_scale_level() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 1000, 800, 256, 0.5);

    let surface = TiledSurface::new("alpha", Size::new(1000.0, 800.0));
    let mut store = AssetStore::new(fixture.root());
    let pixmap = render_tiled(&surface, surface.bounds(), 0.5, &mut store);

    let output = pixmap.into_image();
    // Half-scale level stores 500x400 pixels.
    assert_eq!(output.dimensions(), (500, 400));
    assert_pixel(&output, 100, 100, tile_color(0, 0));
    // Content x=900 maps to level pixel 450, inside the second column.
    assert_pixel(&output, 450, 100, tile_color(1, 0));
}

#[test]
fn test_missing_tile_leaves_cell_undrawn() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 1000, 800, 256, 1.0);
    fixture.remove_tile("alpha", 1.0, 1, 1);

    let surface = TiledSurface::new("alpha", Size::new(1000.0, 800.0));
    let mut store = AssetStore::new(fixture.root());
    let output = render_tiled(&surface, surface.bounds(), 1.0, &mut store).into_image();

    // The missing cell shows background; neighbors still composite.
    assert_pixel(&output, 300, 300, Rgba([0, 0, 0, 255]));
    assert_pixel(&output, 100, 300, tile_color(0, 1));
    assert_pixel(&output, 300, 100, tile_color(1, 0));
}

#[test]
fn test_partial_redraw_renders_only_requested_region() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 1000, 800, 256, 1.0);

    let surface = TiledSurface::new("alpha", Size::new(1000.0, 800.0));
    let mut store = AssetStore::new(fixture.root());

    // A redraw rect inside the second column/row.
    let region = Rect::new(300.0, 300.0, 100.0, 100.0);
    let output = render_tiled(&surface, region, 1.0, &mut store).into_image();

    assert_eq!(output.dimensions(), (100, 100));
    assert_pixel(&output, 50, 50, tile_color(1, 1));
}

#[test]
fn test_caching_resolver_serves_second_redraw_from_memory() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 1000, 800, 256, 1.0);

    let surface = TiledSurface::new("alpha", Size::new(1000.0, 800.0));
    let mut resolver = CachingResolver::new(AssetStore::new(fixture.root()));

    let first = render_tiled(&surface, surface.bounds(), 1.0, &mut resolver).into_image();
    let (_, _, entries) = resolver.cache_stats();
    assert_eq!(entries, 16); // 4x4 grid cached

    // Deleting the assets no longer matters: the redraw hits the cache.
    for row in 0..4 {
        for col in 0..4 {
            fixture.remove_tile("alpha", 1.0, col, row);
        }
    }
    let second = render_tiled(&surface, surface.bounds(), 1.0, &mut resolver).into_image();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_annotated_render_strokes_tile_grid() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 1000, 800, 256, 1.0);

    let surface = TiledSurface::new("alpha", Size::new(1000.0, 800.0)).with_annotations(true);
    let mut store = AssetStore::new(fixture.root());
    let output = render_tiled(&surface, surface.bounds(), 1.0, &mut store).into_image();

    // Borders stroke white at 6/scale; interiors keep the tile color.
    assert_pixel(&output, 0, 0, Rgba([255, 255, 255, 255]));
    assert_pixel(&output, 258, 100, Rgba([255, 255, 255, 255]));
    assert_pixel(&output, 128, 128, tile_color(0, 0));
}

#[test]
fn test_pager_to_pixels_at_fit_zoom() {
    // The full path: catalog -> pager -> configured page -> tiles -> pixels.
    let fixture = GalleryFixture::new();
    fixture.write_catalog(&[("alpha", 1000, 800), ("beta", 1000, 800)]);
    // Fit zoom is 0.32, which quantizes to the quarter-scale level.
    fixture.write_tiles("beta", 1000, 800, 256, 0.25);

    let catalog = Catalog::load(&fixture.catalog_path()).unwrap();
    let mut pager = Pager::new(catalog, VIEWPORT, DisplayMode::Tiled);
    pager.scrolled(VIEWPORT.width); // page 1 under the viewport

    let view = pager.page_at(1).unwrap().view();
    let Some(PageContent::Tiled(surface)) = view.content() else {
        panic!("expected tiled content");
    };

    let draw_scale = surface.level_scale_for_zoom(view.zoom());
    assert_eq!(draw_scale, 0.25);

    let mut store = AssetStore::new(fixture.root());
    let output = render_tiled(surface, view.visible_rect(), draw_scale, &mut store).into_image();

    // The quarter level is a single 250x200 tile.
    assert_eq!(output.dimensions(), (250, 200));
    assert_pixel(&output, 125, 100, tile_color(0, 0));
}

#[test]
fn test_full_image_render_crops_and_scales() {
    let fixture = GalleryFixture::new();
    fixture.write_full_image("alpha", 400, 300, 180);

    let store = AssetStore::new(fixture.root());
    let image = SingleImage {
        name: "alpha".to_string(),
        size: Size::new(400.0, 300.0),
    };

    // Crop the center quarter, output at half resolution.
    let region = Rect::new(100.0, 75.0, 200.0, 150.0);
    let output = render_full_image(&store, &image, region, 0.5).unwrap();

    assert_eq!(output.dimensions(), (100, 75));
    // JPEG is lossy: probe with tolerance.
    let pixel = output.get_pixel(50, 37);
    assert!(
        (pixel[0] as i32 - 180).abs() < 8,
        "unexpected pixel {pixel:?}"
    );
}

#[test]
fn test_full_image_render_missing_asset_errors() {
    let fixture = GalleryFixture::new();
    let store = AssetStore::new(fixture.root());
    let image = SingleImage {
        name: "ghost".to_string(),
        size: Size::new(400.0, 300.0),
    };

    let err = render_full_image(&store, &image, Rect::new(0.0, 0.0, 400.0, 300.0), 1.0)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_uncached_store_rereads_disk_every_time() {
    let fixture = GalleryFixture::new();
    fixture.write_tiles("alpha", 256, 256, 256, 1.0);

    let mut store = AssetStore::new(fixture.root());
    assert!(store.resolve_tile("alpha", 1.0, 0, 0).is_some());

    // The store holds nothing in memory, so a deleted asset disappears.
    fixture.remove_tile("alpha", 1.0, 0, 0);
    assert!(store.resolve_tile("alpha", 1.0, 0, 0).is_none());
}
