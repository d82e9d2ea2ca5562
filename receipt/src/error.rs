//! Error types for receipt construction and barcode embedding

use std::path::PathBuf;
use thiserror::Error;

/// A file the receipt depends on could not be read or written
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to read header template {path}: {source}", path = .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create artifact directory {path}: {source}", path = .path.display())]
    ArtifactDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save barcode image {path}: {source}", path = .path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write receipt document {path}: {source}", path = .path.display())]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Barcode input rejected by the encoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Nothing to encode
    #[error("Barcode data must not be empty")]
    Empty,

    /// Character outside Code 128 set B (ASCII 32 to 127)
    #[error("Character {character:?} at position {position} cannot be encoded in Code 128-B")]
    UnsupportedCharacter {
        /// The offending character
        character: char,
        /// Character index within the input
        position: usize,
    },

    /// Bar width or height is zero, or the image would exceed `MAX_PIXELS`
    #[error("Invalid barcode dimensions: bar width {bar_width}, bar height {bar_height}")]
    InvalidDimensions {
        /// Requested width of a single module in pixels
        bar_width: u32,
        /// Requested bar height in pixels
        bar_height: u32,
    },
}

/// Any failure while producing a receipt
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
