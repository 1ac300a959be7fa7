//! LRU cache for decoded tiles.
//!
//! Tile assets are deliberately loaded uncached by the store; this layer is
//! the backend-side cache that keeps recently drawn tiles decoded so a pan
//! or zoom wiggle does not re-hit the filesystem.
//!
//! # Cache Key
//!
//! Tiles are cached by a composite key:
//! - Image name
//! - Scale bucket (`round(scale * 1000)`)
//! - Column
//! - Row
//!
//! # Size-Based Eviction
//!
//! The cache tracks the estimated decoded size of its entries (RGBA, four
//! bytes per pixel) and evicts least-recently-used tiles when the byte
//! budget is exceeded.

use std::num::NonZeroUsize;
use std::sync::Arc;

use image::RgbaImage;
use lru::LruCache;

use crate::store::scale_bucket;
use crate::tile::TileResolver;

/// Default cache budget: 32MB of decoded pixels.
pub const DEFAULT_TILE_CACHE_CAPACITY: usize = 32 * 1024 * 1024;

/// Default maximum number of entries (to bound LRU overhead)
const DEFAULT_MAX_ENTRIES: usize = 4096;

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key for decoded tiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Image the tile was cut from
    pub image: Arc<str>,

    /// Scale bucket, `round(scale * 1000)`
    pub bucket: u32,

    /// Column (0-indexed from the left)
    pub col: i32,

    /// Row (0-indexed from the top)
    pub row: i32,
}

impl TileKey {
    /// Create a new cache key.
    pub fn new(image: impl Into<Arc<str>>, bucket: u32, col: i32, row: i32) -> Self {
        Self {
            image: image.into(),
            bucket,
            col,
            row,
        }
    }
}

fn tile_bytes(tile: &RgbaImage) -> usize {
    tile.width() as usize * tile.height() as usize * 4
}

// =============================================================================
// Tile Cache
// =============================================================================

/// LRU cache of decoded tiles with a byte-size budget.
///
/// The engine is single-threaded (everything runs off the render loop's
/// signals), so the cache takes `&mut self` instead of wrapping its state
/// in locks.
pub struct TileCache {
    cache: LruCache<TileKey, Arc<RgbaImage>>,
    max_size: usize,
    current_size: usize,
}

impl TileCache {
    /// Create a cache with the default byte budget.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TILE_CACHE_CAPACITY)
    }

    /// Create a cache with the given byte budget.
    pub fn with_capacity(max_size: usize) -> Self {
        Self::with_capacity_and_entries(max_size, DEFAULT_MAX_ENTRIES)
    }

    /// Create a cache with explicit byte budget and entry bound.
    pub fn with_capacity_and_entries(max_size: usize, max_entries: usize) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN),
            ),
            max_size,
            current_size: 0,
        }
    }

    /// Get a tile, marking it recently used.
    pub fn get(&mut self, key: &TileKey) -> Option<Arc<RgbaImage>> {
        self.cache.get(key).cloned()
    }

    /// Check for a tile without updating LRU order.
    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache.contains(key)
    }

    /// Store a tile, evicting least-recently-used entries while the byte
    /// budget is exceeded.
    pub fn put(&mut self, key: TileKey, tile: Arc<RgbaImage>) {
        let size = tile_bytes(&tile);

        // If key exists, subtract old size first
        if let Some(old) = self.cache.peek(&key) {
            self.current_size = self.current_size.saturating_sub(tile_bytes(old));
        }

        self.cache.put(key, tile);
        self.current_size += size;

        while self.current_size > self.max_size {
            match self.cache.pop_lru() {
                Some((_, evicted)) => {
                    self.current_size = self.current_size.saturating_sub(tile_bytes(&evicted));
                }
                None => break,
            }
        }
    }

    /// Remove a tile, returning it if it was cached.
    pub fn remove(&mut self, key: &TileKey) -> Option<Arc<RgbaImage>> {
        let tile = self.cache.pop(key)?;
        self.current_size = self.current_size.saturating_sub(tile_bytes(&tile));
        Some(tile)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_size = 0;
    }

    /// Number of cached tiles.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Estimated decoded bytes currently held.
    pub fn size(&self) -> usize {
        self.current_size
    }

    /// The byte budget.
    pub fn capacity(&self) -> usize {
        self.max_size
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Caching resolver
// =============================================================================

/// A [`TileResolver`] that answers from the cache and falls through to an
/// inner resolver on miss.
///
/// Misses that the inner resolver cannot satisfy are not negatively cached:
/// a tile that appears on disk later is picked up on the next redraw.
pub struct CachingResolver<R> {
    inner: R,
    cache: TileCache,
}

impl<R: TileResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: TileCache::new(),
        }
    }

    pub fn with_capacity(inner: R, max_size: usize) -> Self {
        Self {
            inner,
            cache: TileCache::with_capacity(max_size),
        }
    }

    /// Cache statistics as `(current_bytes, budget_bytes, entry_count)`.
    pub fn cache_stats(&self) -> (usize, usize, usize) {
        (self.cache.size(), self.cache.capacity(), self.cache.len())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl<R: TileResolver> TileResolver for CachingResolver<R> {
    fn resolve_tile(
        &mut self,
        image_name: &str,
        scale: f32,
        col: i32,
        row: i32,
    ) -> Option<Arc<RgbaImage>> {
        let key = TileKey::new(image_name, scale_bucket(scale), col, row);
        if let Some(tile) = self.cache.get(&key) {
            return Some(tile);
        }

        let tile = self.inner.resolve_tile(image_name, scale, col, row)?;
        self.cache.put(key, tile.clone());
        Some(tile)
    }
}

// =============================================================================
// Tests
// =============================================================================
