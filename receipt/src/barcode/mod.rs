//! Barcode artifacts embedded at the bottom of a receipt
//!
//! The receipt builder never draws barcodes itself. It hands the data to a
//! [`BarcodeEncoder`], which produces an image file somewhere next to the
//! rendered document and returns the name the markup should reference.
//!
//! The bundled encoder, [`PngBarcodeWriter`], renders Code 128 set B symbols
//! to a PNG file.

pub mod code128;
mod png;

pub use png::{PngBarcodeWriter, ARTIFACT_FILE_NAME, DEFAULT_ARTIFACT_DIR, MAX_PIXELS};

use crate::error::ReceiptError;

/// Rendering options passed to a [`BarcodeEncoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeOptions {
    /// Width of a single module (narrowest bar) in pixels
    pub bar_width: u32,
    /// Height of the bars in pixels
    pub bar_height: u32,
    /// Show the encoded text beneath the bars
    pub show_text: bool,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            bar_width: 2,
            bar_height: 50,
            show_text: false,
        }
    }
}

/// An image produced by a [`BarcodeEncoder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeArtifact {
    /// Reference embedded in the markup, relative to the rendered document
    pub reference: String,
    /// Human readable text to show under the image, if requested
    pub caption: Option<String>,
}

/// Produces barcode images for the receipt builder
pub trait BarcodeEncoder {
    /// Encode `data` and persist the resulting image
    ///
    /// # Returns
    /// * `Ok(BarcodeArtifact)` - Reference to the persisted image
    /// * `Err(ReceiptError::Encoding)` - The data cannot be encoded
    /// * `Err(ReceiptError::Resource)` - The image could not be written
    fn encode(&self, data: &str, options: &BarcodeOptions)
        -> Result<BarcodeArtifact, ReceiptError>;
}
