//! CLI configuration for the photo-pager tool.
//!
//! The binary exposes three subcommands over a gallery directory:
//!
//! - `check` - validate the catalog and report missing assets
//! - `info` - list catalog entries with their computed zoom bounds
//! - `render` - composite one page to a PNG through the software backend
//!
//! # Environment Variables
//!
//! Common options can be set via environment variables with the `GALLERY_`
//! prefix:
//!
//! - `GALLERY_ROOT` - Gallery root directory (default: `.`)
//! - `GALLERY_DEVICE_SCALE` - Display pixel density (default: 2.0)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::page::DEFAULT_DEVICE_SCALE;
use crate::tile::{DEFAULT_LEVELS_OF_DETAIL, DEFAULT_TILE_CACHE_CAPACITY, DEFAULT_TILE_SIZE};

// =============================================================================
// Default Values
// =============================================================================

/// Default viewport width in points.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 320.0;

/// Default viewport height in points.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 480.0;

// =============================================================================
// CLI
// =============================================================================

/// Photo Pager - paging and tiled-zoom engine for photo galleries.
///
/// Operates on a gallery directory laid out as `ImageData.xml` plus
/// `Images/FullImages/` and `Images/ImageTiles/`.
#[derive(Parser, Debug)]
#[command(name = "photo-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the gallery: catalog readable, assets present
    Check(CheckConfig),

    /// List catalog entries and their zoom bounds
    Info(InfoConfig),

    /// Render one page to a PNG through the software backend
    Render(RenderConfig),
}

// =============================================================================
// Check
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Gallery root containing ImageData.xml and Images/.
    #[arg(long, default_value = ".", env = "GALLERY_ROOT")]
    pub root: PathBuf,

    /// Also verify tile assets for every level of detail.
    #[arg(long, default_value_t = false)]
    pub tiles: bool,

    /// Tile edge length in pixels.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE as u32)]
    pub tile_size: u32,

    /// Pre-rendered levels of detail.
    #[arg(long, default_value_t = DEFAULT_LEVELS_OF_DETAIL)]
    pub levels: u32,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size == 0 {
            return Err("tile_size must be greater than 0".to_string());
        }
        if self.levels == 0 {
            return Err("levels must be greater than 0".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Info
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct InfoConfig {
    /// Gallery root containing ImageData.xml and Images/.
    #[arg(long, default_value = ".", env = "GALLERY_ROOT")]
    pub root: PathBuf,

    /// Viewport width used for the zoom-bound computation.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: f32,

    /// Viewport height used for the zoom-bound computation.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: f32,

    /// Display pixel density (content pixels per point).
    #[arg(long, default_value_t = DEFAULT_DEVICE_SCALE, env = "GALLERY_DEVICE_SCALE")]
    pub device_scale: f32,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InfoConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_viewport(self.width, self.height)?;
        validate_device_scale(self.device_scale)
    }
}

// =============================================================================
// Render
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct RenderConfig {
    /// Gallery root containing ImageData.xml and Images/.
    #[arg(long, default_value = ".", env = "GALLERY_ROOT")]
    pub root: PathBuf,

    /// Page index to render (0-based catalog position).
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Output PNG path.
    #[arg(short, long, default_value = "page.png")]
    pub output: PathBuf,

    /// Viewport width in points.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: f32,

    /// Viewport height in points.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: f32,

    /// Display pixel density (content pixels per point).
    #[arg(long, default_value_t = DEFAULT_DEVICE_SCALE, env = "GALLERY_DEVICE_SCALE")]
    pub device_scale: f32,

    /// Zoom scale override; defaults to the page's fit zoom.
    #[arg(long)]
    pub zoom: Option<f32>,

    /// Render from the decoded full image instead of tiles.
    #[arg(long, default_value_t = false)]
    pub full: bool,

    /// Stroke tile boundaries in the output.
    #[arg(long, default_value_t = false)]
    pub annotate: bool,

    /// Tile edge length in pixels.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE as u32)]
    pub tile_size: u32,

    /// Pre-rendered levels of detail.
    #[arg(long, default_value_t = DEFAULT_LEVELS_OF_DETAIL)]
    pub levels: u32,

    /// Decoded-tile cache budget in bytes.
    #[arg(long, default_value_t = DEFAULT_TILE_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl RenderConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_viewport(self.width, self.height)?;
        validate_device_scale(self.device_scale)?;

        if self.tile_size == 0 {
            return Err("tile_size must be greater than 0".to_string());
        }
        if self.levels == 0 {
            return Err("levels must be greater than 0".to_string());
        }
        if let Some(zoom) = self.zoom {
            if !(zoom > 0.0) {
                return Err("zoom must be greater than 0".to_string());
            }
        }
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn validate_viewport(width: f32, height: f32) -> Result<(), String> {
    if !(width > 0.0) || !(height > 0.0) {
        return Err("viewport width and height must be greater than 0".to_string());
    }
    Ok(())
}

fn validate_device_scale(device_scale: f32) -> Result<(), String> {
    if !(device_scale > 0.0) {
        return Err("device_scale must be greater than 0".to_string());
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
