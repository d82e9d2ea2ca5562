//! Receipt order files
//!
//! An order file is a TOML description of one receipt. The CLI loads it and
//! replays it onto a [`ReceiptBuilder`] section by section.

use crate::barcode::BarcodeOptions;
use crate::builder::{escape_html, ReceiptBuilder, TitleBlock};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// A complete receipt as described in an order file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Document title substituted into the header template
    pub title: String,

    /// Escape caller text before it is embedded, so `<` and `&` print literally
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub escape: bool,

    /// Optional logo image path, relative to the rendered document
    pub logo: Option<String>,

    /// Free-text notes printed after the payment block
    #[serde(default)]
    pub messages: Vec<String>,

    /// Business identity block shown under the logo
    pub business: Option<Business>,

    /// Line items, in printing order
    #[serde(default)]
    pub items: Vec<LineItem>,

    pub subtotal: Option<Subtotal>,

    pub total: Option<Total>,

    /// Payment and change rows printed under the total
    #[serde(default)]
    pub payments: Vec<Payment>,

    pub barcode: Option<Barcode>,
}

/// Business name, address and timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub website: String,
}

/// One purchased item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: String,
    /// Defaults to 1
    pub quantity: Option<u32>,
    /// Smaller secondary line under the item name
    pub detail: Option<String>,
}

/// Subtotal with an optional second row (tax, tip)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtotal {
    pub amount: String,
    pub label: Option<String>,
    pub value: Option<String>,
}

/// Grand total with an optional single tender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    pub amount: String,
    pub method: Option<String>,
    pub tendered: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub method: String,
    pub amount: String,
}

/// Barcode printed at the bottom of the receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barcode {
    pub data: String,
    pub bar_width: Option<u32>,
    pub bar_height: Option<u32>,
    pub show_text: Option<bool>,
}

impl Barcode {
    /// Rendering options, falling back to the defaults for unset fields
    pub fn options(&self) -> BarcodeOptions {
        let defaults = BarcodeOptions::default();
        BarcodeOptions {
            bar_width: self.bar_width.unwrap_or(defaults.bar_width),
            bar_height: self.bar_height.unwrap_or(defaults.bar_height),
            show_text: self.show_text.unwrap_or(defaults.show_text),
        }
    }
}

impl Order {
    /// Load an order from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the order file
    ///
    /// # Returns
    /// * `Ok(Order)` - Successfully loaded order
    /// * `Err(OrderError)` - Error reading or parsing the order file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OrderError> {
        let content = fs::read_to_string(&path).map_err(OrderError::IoError)?;

        let order: Order = toml::from_str(&content).map_err(OrderError::ParseError)?;

        Ok(order)
    }

    /// Save the order to a TOML file
    ///
    /// # Parameters
    /// * `path` - Path where the order file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved order
    /// * `Err(OrderError)` - Error serializing or writing the order file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), OrderError> {
        let content = toml::to_string_pretty(self).map_err(OrderError::SerializeError)?;

        fs::write(&path, content).map_err(OrderError::IoError)?;

        Ok(())
    }

    /// Text as it will be embedded, escaped when the order asks for it
    pub fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.escape {
            Cow::Owned(escape_html(text))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Document title as passed to the header template
    pub fn title(&self) -> Cow<'_, str> {
        self.text(&self.title)
    }

    /// Replay the order onto a builder in receipt order
    ///
    /// The logo path and barcode data are never escaped; they are a file
    /// reference and encoder input rather than printed text.
    pub fn apply(&self, receipt: &mut ReceiptBuilder) {
        if let Some(ref logo) = self.logo {
            receipt.add_logo(logo);
        }

        if let Some(ref business) = self.business {
            receipt.add_title_block(&TitleBlock {
                name: self.text(&business.name).into_owned(),
                address_line1: self.text(&business.address_line1).into_owned(),
                address_line2: self.text(&business.address_line2).into_owned(),
                date: self.text(&business.date).into_owned(),
                time: self.text(&business.time).into_owned(),
                website: self.text(&business.website).into_owned(),
            });
        }

        for item in &self.items {
            let quantity = item.quantity.unwrap_or(1);
            let name = self.text(&item.name);
            let price = self.text(&item.price);
            match item.detail {
                Some(ref detail) => {
                    receipt.add_item_with_detail(quantity, &name, &price, &self.text(detail))
                }
                None => receipt.add_item_with_quantity(quantity, &name, &price),
            };
        }

        if let Some(ref subtotal) = self.subtotal {
            let amount = self.text(&subtotal.amount);
            match complete_pair("subtotal", "label", &subtotal.label, "value", &subtotal.value) {
                Some((label, value)) => {
                    receipt.add_subtotal_with(&amount, &self.text(label), &self.text(value))
                }
                None => receipt.add_subtotal(&amount),
            };
        }

        if let Some(ref total) = self.total {
            let amount = self.text(&total.amount);
            match complete_pair("total", "method", &total.method, "tendered", &total.tendered) {
                Some((method, tendered)) => receipt.add_total_with_payment(
                    &amount,
                    &self.text(method),
                    &self.text(tendered),
                ),
                None => receipt.add_total(&amount),
            };
        }

        for payment in &self.payments {
            receipt.add_payment(&self.text(&payment.method), &self.text(&payment.amount));
        }

        for message in &self.messages {
            receipt.add_message(&self.text(message));
        }

        if let Some(ref barcode) = self.barcode {
            receipt.add_barcode(&barcode.data, &barcode.options());
        }
    }

    /// A bakery receipt exercising every section
    pub fn sample() -> Self {
        let item = |quantity: u32, name: &str, price: &str, detail: Option<&str>| LineItem {
            name: name.to_string(),
            price: price.to_string(),
            quantity: Some(quantity),
            detail: detail.map(str::to_string),
        };
        let payment = |method: &str, amount: &str| Payment {
            method: method.to_string(),
            amount: amount.to_string(),
        };

        Order {
            title: "Your Receipt".to_string(),
            escape: false,
            logo: Some("logo.jpg".to_string()),
            business: Some(Business {
                name: "The Baker's Dozen".to_string(),
                address_line1: "555 Main Street".to_string(),
                address_line2: "San Francisco, CA 94103".to_string(),
                date: "2024-05-01".to_string(),
                time: "08:15:00".to_string(),
                website: "www.bakersdozen.com".to_string(),
            }),
            items: vec![
                item(1, "Ham and Turkey", "$6.00", Some("Swiss, sourdough")),
                item(1, "Apple", "$1.50", None),
                item(3, "Peanut Butter", "$6.75", Some("(@ $2.25 each)<br>single")),
                item(1, "Iced Coffee", "$1.75", None),
            ],
            subtotal: Some(Subtotal {
                amount: "$16.00".to_string(),
                label: Some("Tip".to_string()),
                value: Some("$2.00".to_string()),
            }),
            total: Some(Total {
                amount: "$18.00".to_string(),
                method: None,
                tendered: None,
            }),
            payments: vec![payment("Cash", "-$20.00"), payment("Change", "$2.00")],
            messages: vec!["Thank You<br>Receipt ID: 123456789359".to_string()],
            barcode: Some(Barcode {
                data: "123456789".to_string(),
                bar_width: None,
                bar_height: None,
                show_text: None,
            }),
        }
    }
}

/// Both halves of an optional second row, or `None` with a warning when only one is set
fn complete_pair<'a>(
    section: &str,
    first_name: &str,
    first: &'a Option<String>,
    second_name: &str,
    second: &'a Option<String>,
) -> Option<(&'a str, &'a str)> {
    match (first, second) {
        (Some(first), Some(second)) => Some((first, second)),
        (None, None) => None,
        _ => {
            log::warn!(
                "Ignoring incomplete {} row: `{}` and `{}` must be set together",
                section,
                first_name,
                second_name
            );
            None
        }
    }
}

/// Errors that can occur when loading or saving an order file
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum OrderError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderError::IoError(e) => write!(f, "IO error: {}", e),
            OrderError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            OrderError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for OrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderError::IoError(e) => Some(e),
            OrderError::ParseError(e) => Some(e),
            OrderError::SerializeError(e) => Some(e),
        }
    }
}
