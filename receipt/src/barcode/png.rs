//! PNG rendering of Code 128-B barcodes

use super::{code128, BarcodeArtifact, BarcodeEncoder, BarcodeOptions};
use crate::error::{EncodingError, ReceiptError, ResourceError};
use image::{GrayImage, ImageFormat, Luma};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the generated barcode image
///
/// Every call overwrites the same file; callers that need several barcodes
/// side by side must move the previous artifact away first.
pub const ARTIFACT_FILE_NAME: &str = "barcode.png";

/// Directory the default writer saves artifacts into
pub const DEFAULT_ARTIFACT_DIR: &str = "html";

/// Largest image, in pixels, the writer will allocate
pub const MAX_PIXELS: u64 = 16 * 1024 * 1024;

const BAR: Luma<u8> = Luma([0]);
const SPACE: Luma<u8> = Luma([255]);

/// Writes Code 128-B barcodes as `barcode.png` inside an output directory
#[derive(Debug, Clone)]
pub struct PngBarcodeWriter {
    output_dir: PathBuf,
}

impl PngBarcodeWriter {
    /// Create a writer that saves artifacts into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory the artifact is written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the artifact this writer produces
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(ARTIFACT_FILE_NAME)
    }

    /// Render `data` into a grayscale image without touching the filesystem
    pub fn render(data: &str, options: &BarcodeOptions) -> Result<GrayImage, EncodingError> {
        let invalid = || EncodingError::InvalidDimensions {
            bar_width: options.bar_width,
            bar_height: options.bar_height,
        };

        if options.bar_width == 0 || options.bar_height == 0 {
            return Err(invalid());
        }

        let values = code128::symbol_values(data)?;
        let modules = code128::modules(&values);

        let width = u32::try_from(modules.len())
            .ok()
            .and_then(|count| count.checked_mul(options.bar_width))
            .ok_or_else(invalid)?;

        if u64::from(width) * u64::from(options.bar_height) > MAX_PIXELS {
            return Err(invalid());
        }

        Ok(GrayImage::from_fn(width, options.bar_height, |x, _| {
            if modules[(x / options.bar_width) as usize] {
                BAR
            } else {
                SPACE
            }
        }))
    }
}

impl Default for PngBarcodeWriter {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_DIR)
    }
}

impl BarcodeEncoder for PngBarcodeWriter {
    fn encode(
        &self,
        data: &str,
        options: &BarcodeOptions,
    ) -> Result<BarcodeArtifact, ReceiptError> {
        let image = Self::render(data, options)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| {
            ResourceError::ArtifactDirectory {
                path: self.output_dir.clone(),
                source,
            }
        })?;

        let path = self.artifact_path();
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ResourceError::ArtifactWrite {
                path: path.clone(),
                source,
            })?;

        log::info!("Wrote barcode image to {}", path.display());

        Ok(BarcodeArtifact {
            reference: ARTIFACT_FILE_NAME.to_string(),
            caption: options.show_text.then(|| data.to_string()),
        })
    }
}
