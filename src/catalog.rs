//! The image catalog: the ordered list of gallery entries.
//!
//! The catalog is the single source of identity for pages. A page exists if
//! and only if the catalog has an entry at its index; the entry's declared
//! dimensions drive frame, zoom, and tile addressing without touching pixel
//! data.
//!
//! The on-disk form is an XML document of `<ImageInfo>` elements, each
//! carrying `<Name>`, `<Width>` and `<Height>` children (in any order):
//!
//! ```xml
//! <ArrayOfImageInfo>
//!   <ImageInfo>
//!     <Name>Shoreline</Name>
//!     <Width>3000</Width>
//!     <Height>2000</Height>
//!   </ImageInfo>
//! </ArrayOfImageInfo>
//! ```
//!
//! Loading happens once, at controller construction; the resulting value is
//! owned by the [`Pager`](crate::page::Pager) rather than living in a
//! process-wide cache. A catalog that fails to load is reported as a warning
//! and replaced by an empty catalog, which renders as a zero-page gallery.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::CatalogError;
use crate::geometry::Size;

/// Conventional catalog file name at the gallery root.
pub const CATALOG_FILE: &str = "ImageData.xml";

// =============================================================================
// ImageInfo
// =============================================================================

/// Metadata for one gallery image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Base name shared by the full image and its tiles
    pub name: String,

    /// Full-resolution width in pixels
    pub width: u32,

    /// Full-resolution height in pixels
    pub height: u32,
}

impl ImageInfo {
    /// The declared full-resolution size as a float [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, immutable list of gallery images. Position is page index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    images: Vec<ImageInfo>,
}

impl Catalog {
    /// Create a catalog from an already-built entry list.
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self { images }
    }

    /// An empty catalog (zero pages).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the catalog from an XML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Load the catalog, degrading to an empty catalog on failure.
    ///
    /// Any error is logged; paging logic never sees it (a zero-page gallery
    /// is the failure mode).
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load image catalog, gallery will be empty");
                Self::empty()
            }
        }
    }

    /// Parse a catalog from XML text.
    pub fn parse(xml: &str) -> Result<Self, CatalogError> {
        let doc = roxmltree::Document::parse(xml)?;

        let mut images = Vec::new();
        for (index, node) in doc
            .root_element()
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "ImageInfo")
            .enumerate()
        {
            let name = child_text(&node, "Name")
                .ok_or(CatalogError::MissingField {
                    index,
                    field: "Name",
                })?
                .to_string();
            let width = parse_dimension(&node, index, "Width")?;
            let height = parse_dimension(&node, index, "Height")?;

            images.push(ImageInfo {
                name,
                width,
                height,
            });
        }

        Ok(Self { images })
    }

    /// Number of images (equals the gallery's page count).
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ImageInfo> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageInfo> {
        self.images.iter()
    }
}

fn child_text<'a>(node: &roxmltree::Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
        .and_then(|n| n.text())
        .map(str::trim)
}

fn parse_dimension(
    node: &roxmltree::Node<'_, '_>,
    index: usize,
    field: &'static str,
) -> Result<u32, CatalogError> {
    let text = child_text(node, field).ok_or(CatalogError::MissingField { index, field })?;
    text.parse().map_err(|_| CatalogError::InvalidField {
        index,
        field,
        value: text.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
