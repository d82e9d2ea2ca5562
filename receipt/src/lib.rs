//! receipt - HTML receipt generation for point-of-sale systems
//!
//! Receipts are assembled section by section with [`ReceiptBuilder`] and come
//! out as a single HTML 3.2 document suitable for simple embedded renderers.
//! Barcodes are produced by a [`BarcodeEncoder`]; the bundled
//! [`PngBarcodeWriter`] writes Code 128-B images next to the document.
//!
//! Prices, quantities and totals are never computed here. Every value is an
//! already formatted string.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod barcode;
pub mod builder;
pub mod error;
pub mod order;
pub mod template;

pub use barcode::{BarcodeArtifact, BarcodeEncoder, BarcodeOptions, PngBarcodeWriter};
pub use builder::{escape_html, DocumentState, ReceiptBuilder, TitleBlock};
pub use error::{EncodingError, ReceiptError, ResourceError};
pub use order::{Order, OrderError};
