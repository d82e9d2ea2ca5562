//! Incremental HTML receipt builder
//!
//! [`ReceiptBuilder`] appends receipt sections (logo, title block, items,
//! subtotal, total, payments, messages, barcode) to a fixed header and keeps
//! track of which table is currently open. Any section that does not belong
//! in the open table terminates it first, so callers can invoke the section
//! methods in any order and still get balanced markup.
//!
//! All caller text is embedded verbatim. Prices, names and messages are
//! treated as pre-formatted markup; use [`crate::escape_html`] beforehand if
//! the input is untrusted.

use crate::barcode::{BarcodeEncoder, BarcodeOptions, PngBarcodeWriter};
use crate::error::{ReceiptError, ResourceError};
use crate::template;
use std::fmt;
use std::fs;
use std::path::Path;

/// Receipt width in pixels, shared by every table and divider
const RECEIPT_WIDTH: u32 = 320;

const DOCUMENT_END: &str = "</body></html>";
const TABLE_START: &str = "<table width=320>";
const TABLE_END: &str = "</table>";

/// Whether the document still accepts sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Sections can be appended
    Open,
    /// The document terminator has been written; all mutations are ignored
    Closed,
}

/// Tables that stay open across several calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Items,
    Payment,
}

impl Section {
    fn start_markup(self) -> String {
        match self {
            Section::Items => TABLE_START.to_string(),
            Section::Payment => format!("{}{}", divider(4), TABLE_START),
        }
    }
}

/// Business identity shown below the logo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBlock {
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub date: String,
    pub time: String,
    pub website: String,
}

/// Accumulated markup plus the open/closed bookkeeping
#[derive(Debug, Clone)]
struct Document {
    body: String,
    state: DocumentState,
    items_open: bool,
    payment_open: bool,
}

impl Document {
    fn new(header: &str) -> Self {
        Self {
            body: header.to_string(),
            state: DocumentState::Open,
            items_open: false,
            payment_open: false,
        }
    }

    fn is_open(&self, section: Section) -> bool {
        match section {
            Section::Items => self.items_open,
            Section::Payment => self.payment_open,
        }
    }

    fn set_open(&mut self, section: Section, open: bool) {
        match section {
            Section::Items => self.items_open = open,
            Section::Payment => self.payment_open = open,
        }
    }

    fn open_section(&mut self, section: Section) {
        if self.is_open(section) {
            return;
        }
        self.body.push_str(&section.start_markup());
        self.set_open(section, true);
        log::debug!("Opened {:?} section", section);
    }

    fn close_section(&mut self, section: Section) {
        if !self.is_open(section) {
            return;
        }
        self.body.push_str(TABLE_END);
        self.set_open(section, false);
        log::debug!("Closed {:?} section", section);
    }
}

/// Builds a receipt document one section at a time
///
/// ```no_run
/// use receipt::ReceiptBuilder;
///
/// let mut receipt = ReceiptBuilder::new("Your Receipt")?;
/// receipt
///     .add_item_with_quantity(1, "Coffee", "$2.00")
///     .add_subtotal("$2.00")
///     .add_total("$2.00")
///     .add_payment("Cash", "$2.00");
/// let html = receipt.document();
/// # Ok::<(), receipt::ResourceError>(())
/// ```
pub struct ReceiptBuilder {
    header: String,
    document: Document,
    encoder: Box<dyn BarcodeEncoder>,
}

impl fmt::Debug for ReceiptBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptBuilder")
            .field("header", &self.header)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl ReceiptBuilder {
    /// Create a builder from the default header template (`html/header.template`)
    ///
    /// # Returns
    /// * `Ok(ReceiptBuilder)` - Builder holding the substituted header
    /// * `Err(ResourceError)` - The template could not be read
    pub fn new(title: &str) -> Result<Self, ResourceError> {
        Self::from_template_path(template::DEFAULT_TEMPLATE_PATH, title)
    }

    /// Create a builder from a header template stored at `path`
    pub fn from_template_path<P: AsRef<Path>>(
        path: P,
        title: &str,
    ) -> Result<Self, ResourceError> {
        let header = template::load_header(path, title)?;
        Ok(Self::with_header(header))
    }

    /// Create a builder from template text already in memory
    pub fn from_template_str(template_text: &str, title: &str) -> Self {
        Self::with_header(template::substitute_title(template_text, title))
    }

    fn with_header(header: String) -> Self {
        Self {
            document: Document::new(&header),
            header,
            encoder: Box::new(PngBarcodeWriter::default()),
        }
    }

    /// Replace the encoder used by [`ReceiptBuilder::add_barcode`]
    pub fn with_barcode_encoder(mut self, encoder: Box<dyn BarcodeEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// The substituted header every document starts from
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Current document state
    pub fn state(&self) -> DocumentState {
        self.document.state
    }

    /// Whether the document terminator has been written
    pub fn is_closed(&self) -> bool {
        self.document.state == DocumentState::Closed
    }

    /// Whether the item table is open
    pub fn items_open(&self) -> bool {
        self.document.items_open
    }

    /// Whether the total/payment table is open
    pub fn payment_open(&self) -> bool {
        self.document.payment_open
    }

    /// Discard all sections and start over from the header
    pub fn reset(&mut self) {
        self.document = Document::new(&self.header);
    }

    /// Run `append` against the document unless it is closed
    fn append(&mut self, operation: &str, append: impl FnOnce(&mut Document)) -> &mut Self {
        match self.document.state {
            DocumentState::Open => append(&mut self.document),
            DocumentState::Closed => {
                log::debug!("Ignoring {} on a closed receipt", operation);
            }
        }
        self
    }

    /// Add a logo image at the top of the receipt
    pub fn add_logo(&mut self, image_path: &str) -> &mut Self {
        self.append("add_logo", |doc| {
            doc.body.push_str(&format!(
                "<img src=\"{}\" width={} height=100>\n",
                image_path, RECEIPT_WIDTH
            ));
        })
    }

    /// Add the business name, address, date, time and website
    ///
    /// Meant to be called once, right after the logo. Neither is enforced.
    pub fn add_title_block(&mut self, title: &TitleBlock) -> &mut Self {
        self.append("add_title_block", |doc| {
            doc.body.push_str(&format!(
                "<h1><font size=+1 face=\"verdana\"><b>{}</b></font></h1>\n",
                title.name
            ));
            doc.body.push_str(TABLE_START);
            doc.body.push('\n');
            doc.body.push_str(&format!(
                "<tr>\n<td>{}<br>{}</td>\n<td class=\"td-right\">{}<br>{}</td></tr>",
                title.address_line1, title.address_line2, title.date, title.time
            ));
            doc.body.push_str(&format!(
                "<tr><td><b>{}</b></td><td></td></tr>",
                title.website
            ));
            doc.body.push_str(TABLE_END);
            doc.body.push_str(&divider(4));
        })
    }

    /// Add a single-quantity item
    pub fn add_item(&mut self, name: &str, price: &str) -> &mut Self {
        self.add_item_with_quantity(1, name, price)
    }

    /// Add an item with an explicit quantity
    pub fn add_item_with_quantity(&mut self, quantity: u32, name: &str, price: &str) -> &mut Self {
        self.push_item(quantity, name, price, None)
    }

    /// Add an item with a smaller detail line under its name
    pub fn add_item_with_detail(
        &mut self,
        quantity: u32,
        name: &str,
        price: &str,
        detail: &str,
    ) -> &mut Self {
        self.push_item(quantity, name, price, Some(detail))
    }

    fn push_item(
        &mut self,
        quantity: u32,
        name: &str,
        price: &str,
        detail: Option<&str>,
    ) -> &mut Self {
        self.append("add_item", |doc| {
            doc.close_section(Section::Payment);
            doc.open_section(Section::Items);

            let label = match detail {
                Some(detail) => format!(
                    "{} × {}<div class=\"detail\">{}</div>",
                    quantity,
                    name,
                    verdana(detail)
                ),
                None => verdana(&format!("{} × {}", quantity, name)),
            };
            doc.body.push_str(&format!(
                "<tr><td class=\"item\">{}</td><td class=\"price\">{}</td></tr>",
                label,
                verdana(price)
            ));
        })
    }

    /// Add a subtotal block, closing the item table first
    pub fn add_subtotal(&mut self, subtotal: &str) -> &mut Self {
        self.push_subtotal(subtotal, None)
    }

    /// Add a subtotal block with a second row such as tax or tip
    pub fn add_subtotal_with(&mut self, subtotal: &str, label: &str, value: &str) -> &mut Self {
        self.push_subtotal(subtotal, Some((label, value)))
    }

    fn push_subtotal(&mut self, subtotal: &str, second_row: Option<(&str, &str)>) -> &mut Self {
        self.append("add_subtotal", |doc| {
            doc.close_section(Section::Items);

            doc.body.push_str(&divider(1));
            doc.body.push_str(TABLE_START);
            doc.body.push_str(&subtotal_row("Subtotal", subtotal));
            if let Some((label, value)) = second_row {
                doc.body.push_str(&subtotal_row(label, value));
            }
            doc.body.push_str(TABLE_END);
            doc.body.push_str(&divider(4));
        })
    }

    /// Add the grand total, opening the payment table if needed
    pub fn add_total(&mut self, total: &str) -> &mut Self {
        self.push_total(total, None)
    }

    /// Add the grand total followed by a single payment row
    ///
    /// Saves a call to [`ReceiptBuilder::add_payment`] for exact-change tenders.
    pub fn add_total_with_payment(&mut self, total: &str, method: &str, amount: &str) -> &mut Self {
        self.push_total(total, Some((method, amount)))
    }

    fn push_total(&mut self, total: &str, payment: Option<(&str, &str)>) -> &mut Self {
        self.append("add_total", |doc| {
            doc.close_section(Section::Items);
            doc.open_section(Section::Payment);

            doc.body.push_str(&payment_row("Total", total));
            if let Some((method, amount)) = payment {
                doc.body.push_str(&payment_row(method, amount));
            }
        })
    }

    /// Add a payment or change row under the total
    ///
    /// Does nothing unless a total has opened the payment table.
    pub fn add_payment(&mut self, method: &str, amount: &str) -> &mut Self {
        self.append("add_payment", |doc| {
            if !doc.payment_open {
                log::debug!("Ignoring payment row {:?}: no total yet", method);
                return;
            }
            doc.body.push_str(&payment_row(method, amount));
        })
    }

    /// Add a free-text note, e.g. a thank-you line or survey link
    pub fn add_message(&mut self, message: &str) -> &mut Self {
        self.append("add_message", |doc| {
            doc.close_section(Section::Payment);
            doc.body
                .push_str(&format!("<div class=\"receipt-id\">{}</div>", message));
        })
    }

    /// Add a previously generated barcode (or any other) image
    pub fn add_barcode_image(&mut self, image_path: &str) -> &mut Self {
        self.push_barcode_image(image_path, None)
    }

    fn push_barcode_image(&mut self, image_path: &str, caption: Option<&str>) -> &mut Self {
        self.append("add_barcode_image", |doc| {
            doc.close_section(Section::Payment);
            doc.body.push_str(&format!(
                "<div width={0} style=\"width: {0}px\"><img class=\"barcode\" src=\"{1}\" width=250 height=30>",
                RECEIPT_WIDTH, image_path
            ));
            if let Some(caption) = caption {
                doc.body
                    .push_str(&format!("<div class=\"barcode-text\">{}</div>", caption));
            }
            doc.body.push_str("</div>");
        })
    }

    /// Generate a barcode for `data` and embed it
    ///
    /// Failures are logged and the document is left untouched, so the receipt
    /// still prints without the barcode. Use [`ReceiptBuilder::try_add_barcode`]
    /// to observe the failure.
    pub fn add_barcode(&mut self, data: &str, options: &BarcodeOptions) -> &mut Self {
        if let Err(e) = self.try_add_barcode(data, options) {
            match e {
                ReceiptError::Encoding(e) => log::warn!("Unable to generate barcode: {}", e),
                ReceiptError::Resource(e) => log::warn!("Unable to save barcode image: {}", e),
            }
        }
        self
    }

    /// Generate a barcode for `data` and embed it, reporting failures
    ///
    /// # Returns
    /// * `Ok(())` - The barcode was embedded, or the document is closed
    /// * `Err(ReceiptError)` - The encoder failed; the document is unchanged
    pub fn try_add_barcode(
        &mut self,
        data: &str,
        options: &BarcodeOptions,
    ) -> Result<(), ReceiptError> {
        if self.is_closed() {
            log::debug!("Ignoring add_barcode on a closed receipt");
            return Ok(());
        }

        let artifact = self.encoder.encode(data, options)?;
        self.push_barcode_image(&artifact.reference, artifact.caption.as_deref());
        Ok(())
    }

    /// Terminate the document
    ///
    /// Any table still open is terminated before the document end. Calling
    /// this more than once has no further effect.
    pub fn close(&mut self) -> &mut Self {
        self.append("close", |doc| {
            doc.close_section(Section::Payment);
            doc.close_section(Section::Items);
            doc.body.push_str(DOCUMENT_END);
            doc.state = DocumentState::Closed;
            log::debug!("Closed receipt ({} bytes)", doc.body.len());
        })
    }

    /// The finished document, closing it first if necessary
    pub fn document(&mut self) -> &str {
        self.close();
        &self.document.body
    }

    /// Consume the builder and return the finished document
    pub fn into_document(mut self) -> String {
        self.close();
        self.document.body
    }

    /// Close the document and write it to `path`, creating parent directories
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ResourceError> {
        let path = path.as_ref();
        let write_error = |source| ResourceError::DocumentWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, self.document()).map_err(write_error)?;

        log::info!("Wrote receipt to {}", path.display());
        Ok(())
    }
}

/// Horizontal rule drawn with a stretched black pixel
fn divider(height: u32) -> String {
    format!(
        "<img src=\"black.gif\" width={} height={}>",
        RECEIPT_WIDTH, height
    )
}

fn verdana(text: &str) -> String {
    format!("<font face=\"verdana\">{}</font>", text)
}

fn subtotal_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td>{}</td><td class=\"price\">{}</td></tr>",
        verdana(label),
        verdana(value)
    )
}

fn payment_row(label: &str, value: &str) -> String {
    format!("<tr><td>{}</td><td class=\"total\">{}</td></tr>", label, value)
}

/// Escape HTML special characters
///
/// The builder never escapes on its own; call this on untrusted text before
/// passing it in.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
