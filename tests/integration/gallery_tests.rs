//! End-to-end paging tests against catalogs loaded from disk.

use photo_pager::catalog::Catalog;
use photo_pager::geometry::{Point, Size};
use photo_pager::page::{DisplayMode, PageContent, Pager};

use super::test_utils::GalleryFixture;

const VIEWPORT: Size = Size {
    width: 320.0,
    height: 480.0,
};

fn sorted_visible(pager: &Pager) -> Vec<usize> {
    let mut indices: Vec<usize> = pager.visible_pages().iter().map(|s| s.index()).collect();
    indices.sort_unstable();
    indices
}

#[test]
fn test_catalog_from_disk_drives_paging() {
    let fixture = GalleryFixture::new();
    fixture.write_catalog(&[("alpha", 1000, 800), ("beta", 640, 480), ("gamma", 2000, 1500)]);

    let catalog = Catalog::load(&fixture.catalog_path()).unwrap();
    let mut pager = Pager::new(catalog, VIEWPORT, DisplayMode::Tiled);

    assert_eq!(pager.page_count(), 3);
    assert_eq!(sorted_visible(&pager), vec![0]);
    assert_eq!(
        pager.page_at(0).unwrap().view().content().unwrap().image_name(),
        "alpha"
    );

    // Swipe through the gallery.
    pager.scrolled(480.0);
    assert_eq!(sorted_visible(&pager), vec![1, 2]);
    assert_eq!(
        pager.page_at(2).unwrap().view().content().unwrap().image_name(),
        "gamma"
    );

    // Each configured page starts at its own fit zoom.
    let beta = pager.page_at(1).unwrap().view();
    assert!((beta.zoom() - 0.5).abs() < 1e-4); // 640x480 at device scale 2 clamps to 1:1
}

#[test]
fn test_corrupt_catalog_degrades_to_empty_gallery() {
    let fixture = GalleryFixture::new();
    fixture.write_raw_catalog("<ArrayOfImageInfo><ImageInfo>");

    let catalog = Catalog::load_or_empty(&fixture.catalog_path());
    assert!(catalog.is_empty());

    let mut pager = Pager::new(catalog, VIEWPORT, DisplayMode::Tiled);
    assert!(pager.visible_pages().is_empty());

    // Scrolling an empty gallery stays empty rather than erroring.
    pager.scrolled(960.0);
    assert!(pager.visible_pages().is_empty());
}

#[test]
fn test_missing_catalog_degrades_to_empty_gallery() {
    let fixture = GalleryFixture::new();
    let catalog = Catalog::load_or_empty(&fixture.catalog_path());
    assert!(catalog.is_empty());
}

#[test]
fn test_slot_population_is_conserved_across_sweep() {
    let fixture = GalleryFixture::new();
    let entries: Vec<(String, u32, u32)> = (0..8)
        .map(|i| (format!("img{i}"), 1000, 800))
        .collect();
    let entry_refs: Vec<(&str, u32, u32)> =
        entries.iter().map(|(n, w, h)| (n.as_str(), *w, *h)).collect();
    fixture.write_catalog(&entry_refs);

    let catalog = Catalog::load(&fixture.catalog_path()).unwrap();
    let mut pager = Pager::new(catalog, VIEWPORT, DisplayMode::Tiled);

    // Drive to a straddling position so two slots exist, then sweep: every
    // retile must keep visible + recycled constant (reuse, never leak).
    pager.scrolled(160.0);
    let population = pager.visible_pages().len() + pager.recycled_count();

    let mut offset = -160.0;
    while offset < 8.0 * VIEWPORT.width + 300.0 {
        pager.scrolled(offset);
        assert_eq!(
            pager.visible_pages().len() + pager.recycled_count(),
            population,
            "population changed at offset {offset}"
        );

        // No duplicate indices among visible slots.
        let mut indices = sorted_visible(&pager);
        indices.dedup();
        assert_eq!(indices.len(), pager.visible_pages().len());

        offset += 73.0; // deliberately not page-aligned
    }
}

#[test]
fn test_rotation_round_trip_preserves_visual_anchor() {
    let fixture = GalleryFixture::new();
    fixture.write_catalog(&[("alpha", 1000, 800)]);
    let catalog = Catalog::load(&fixture.catalog_path()).unwrap();
    let mut pager = Pager::new(catalog, VIEWPORT, DisplayMode::Tiled);

    // Zoom in and pan somewhere distinctive.
    {
        let view = pager.page_at_mut(0).unwrap().view_mut();
        view.set_zoom(0.5);
        view.set_offset(Point::new(120.0, 80.0));
    }
    let anchor_before = pager.page_at(0).unwrap().view().capture_restore_point();

    // Portrait -> landscape -> portrait.
    pager.begin_rotation();
    pager.finish_rotation(Size::new(480.0, 320.0));
    pager.begin_rotation();
    pager.finish_rotation(VIEWPORT);

    let view = pager.page_at(0).unwrap().view();
    let anchor_after = view.capture_restore_point();

    assert!((anchor_after.scale - anchor_before.scale).abs() < 1e-3);
    assert!((anchor_after.center.x - anchor_before.center.x).abs() < 0.5);
    assert!((anchor_after.center.y - anchor_before.center.y).abs() < 0.5);
}

#[test]
fn test_rotation_keeps_scroll_on_same_page() {
    let fixture = GalleryFixture::new();
    fixture.write_catalog(&[("a", 1000, 800), ("b", 1000, 800), ("c", 1000, 800)]);
    let catalog = Catalog::load(&fixture.catalog_path()).unwrap();
    let mut pager = Pager::new(catalog, VIEWPORT, DisplayMode::Tiled);

    // A third of the way into page 1.
    pager.scrolled(VIEWPORT.width * (1.0 + 1.0 / 3.0));
    pager.begin_rotation();
    pager.finish_rotation(Size::new(480.0, 320.0));

    assert!((pager.offset() - 480.0 * (1.0 + 1.0 / 3.0)).abs() < 1e-2);
}

#[test]
fn test_full_image_mode_configures_single_content() {
    let fixture = GalleryFixture::new();
    fixture.write_catalog(&[("alpha", 1000, 800)]);
    let catalog = Catalog::load(&fixture.catalog_path()).unwrap();
    let pager = Pager::new(catalog, VIEWPORT, DisplayMode::FullImage);

    match pager.page_at(0).unwrap().view().content() {
        Some(PageContent::Single(image)) => {
            assert_eq!(image.name, "alpha");
            assert_eq!(image.size, Size::new(1000.0, 800.0));
        }
        other => panic!("expected single-image content, got {other:?}"),
    }
}
