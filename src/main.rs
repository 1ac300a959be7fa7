//! Photo Pager - gallery validation and offline page rendering.
//!
//! This binary drives the paging/zoom/tiling engine headless: it checks a
//! gallery directory's catalog and assets, prints zoom bounds, and renders
//! pages through the software canvas.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photo_pager::{
    catalog::{Catalog, CATALOG_FILE},
    config::{CheckConfig, Cli, Command, InfoConfig, RenderConfig},
    error::RenderError,
    geometry::Size,
    page::{zoom_bounds, DisplayMode, PageContent, Pager, PagerOptions},
    render::{render_full_image, render_tiled},
    store::AssetStore,
    tile::CachingResolver,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(config) => run_check(config),
        Command::Info(config) => run_info(config),
        Command::Render(config) => run_render(config),
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "photo_pager=debug"
    } else {
        "photo_pager=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// =============================================================================
// Check Command
// =============================================================================

fn run_check(config: CheckConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Photo Pager Gallery Check");
    println!("═════════════════════════");
    println!();

    let catalog_path = config.root.join(CATALOG_FILE);
    let catalog = match Catalog::load(&catalog_path) {
        Ok(catalog) => {
            println!("✓ Catalog: {} image(s)", catalog.len());
            catalog
        }
        Err(e) => {
            println!("✗ Catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = AssetStore::new(&config.root);
    let mut failures = 0usize;

    for info in catalog.iter() {
        let full_path = store.full_image_path(&info.name);
        if full_path.exists() {
            println!("✓ {} ({}x{})", info.name, info.width, info.height);
        } else {
            println!("✗ {}: missing {}", info.name, full_path.display());
            failures += 1;
        }

        if config.tiles {
            let missing = count_missing_tiles(&store, info, config.tile_size, config.levels);
            if missing == 0 {
                println!("    tiles: complete across {} level(s)", config.levels);
            } else {
                println!("    tiles: {} missing", missing);
                failures += 1;
            }
        }
    }

    println!();
    if failures == 0 {
        println!("✓ All checks passed!");
        ExitCode::SUCCESS
    } else {
        println!("✗ {} problem(s) found", failures);
        ExitCode::FAILURE
    }
}

/// Count absent tile files for one image across all levels of detail.
fn count_missing_tiles(
    store: &AssetStore,
    info: &photo_pager::catalog::ImageInfo,
    tile_size: u32,
    levels: u32,
) -> usize {
    let mut missing = 0;
    for level in 0..levels {
        let scale = (-(level as f32)).exp2();
        let bucket = photo_pager::store::scale_bucket(scale);

        // Tiles are addressed in full-resolution-relative units: a tile at
        // half scale spans twice the content.
        let span = tile_size as f32 / scale;
        let cols = (info.width as f32 / span).ceil() as i32;
        let rows = (info.height as f32 / span).ceil() as i32;

        for row in 0..rows.max(1) {
            for col in 0..cols.max(1) {
                if !store.tile_path(&info.name, bucket, col, row).exists() {
                    missing += 1;
                }
            }
        }
    }
    missing
}

// =============================================================================
// Info Command
// =============================================================================

fn run_info(config: InfoConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let catalog_path = config.root.join(CATALOG_FILE);
    let catalog = match Catalog::load(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let viewport = Size::new(config.width, config.height);
    println!(
        "Gallery at {}: {} page(s), viewport {}x{} @{}x",
        config.root.display(),
        catalog.len(),
        config.width,
        config.height,
        config.device_scale
    );
    println!("─────────────────────────────────────────────");

    for (index, info) in catalog.iter().enumerate() {
        let (min_zoom, max_zoom) = zoom_bounds(viewport, info.size(), config.device_scale);
        println!(
            "  [{index}] {} {}x{}  zoom {:.3}..{:.3}",
            info.name, info.width, info.height, min_zoom, max_zoom
        );
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Render Command
// =============================================================================

fn run_render(config: RenderConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match render_page(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Render failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn render_page(config: &RenderConfig) -> Result<(), RenderError> {
    let catalog = Catalog::load_or_empty(&config.root.join(CATALOG_FILE));
    let page_count = catalog.len();

    let mode = if config.full {
        DisplayMode::FullImage
    } else {
        DisplayMode::Tiled
    };
    let options = PagerOptions {
        device_scale: config.device_scale,
        tile_size: Size::new(config.tile_size as f32, config.tile_size as f32),
        levels_of_detail: config.levels,
        annotate_tiles: config.annotate,
    };

    let viewport = Size::new(config.width, config.height);
    let mut pager = Pager::with_options(catalog, viewport, mode, options);

    // Scroll the requested page under the viewport; retiling configures it.
    pager.scrolled(config.page as f32 * viewport.width);

    let Some(slot) = pager.page_at_mut(config.page) else {
        return Err(RenderError::PageOutOfRange {
            index: config.page,
            count: page_count,
        });
    };
    if let Some(zoom) = config.zoom {
        slot.view_mut().set_zoom(zoom);
    }

    let view = slot.view();
    let visible = view.visible_rect();
    let zoom = view.zoom();
    let store = AssetStore::new(&config.root);

    let output = match view.content() {
        Some(PageContent::Tiled(surface)) => {
            let draw_scale = surface.level_scale_for_zoom(zoom);
            let mut resolver =
                CachingResolver::with_capacity(store, config.cache_capacity);
            let pixmap = render_tiled(surface, visible, draw_scale, &mut resolver);

            let (cache_bytes, _, cache_entries) = resolver.cache_stats();
            info!(
                draw_scale,
                cache_entries,
                cache_kb = cache_bytes / 1024,
                "tiled render complete"
            );
            pixmap.into_image()
        }
        Some(PageContent::Single(image)) => {
            render_full_image(&store, image, visible, zoom * config.device_scale)?
        }
        None => {
            return Err(RenderError::PageOutOfRange {
                index: config.page,
                count: page_count,
            })
        }
    };

    output
        .save(&config.output)
        .map_err(|source| RenderError::Encode {
            path: config.output.clone(),
            source,
        })?;

    info!(
        page = config.page,
        zoom,
        width = output.width(),
        height = output.height(),
        output = %config.output.display(),
        "wrote page render"
    );
    Ok(())
}
