use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading the image catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not well-formed XML
    #[error("malformed catalog XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// An entry is missing one of Name/Width/Height
    #[error("catalog entry {index}: missing <{field}> element")]
    MissingField { index: usize, field: &'static str },

    /// An entry has a value that does not parse
    #[error("catalog entry {index}: invalid <{field}> value {value:?}")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// Errors that can occur when loading image assets from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file does not exist
    #[error("asset not found: {path}")]
    NotFound { path: PathBuf },

    /// The asset file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The asset bytes could not be decoded as an image
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AssetError {
    /// True when the asset is simply absent, as opposed to unreadable or
    /// corrupt. Missing tiles are expected and handled per-cell.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound { .. })
    }
}

/// Errors surfaced by the offline page renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Requested page index is beyond the catalog
    #[error("page {index} out of range: catalog has {count} image(s)")]
    PageOutOfRange { index: usize, count: usize },

    /// Asset loading failed
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Writing the output image failed
    #[error("failed to encode output {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
