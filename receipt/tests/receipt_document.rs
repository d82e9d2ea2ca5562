use receipt::{
    BarcodeOptions, DocumentState, EncodingError, Order, PngBarcodeWriter, ReceiptBuilder,
    ReceiptError, ResourceError,
};
use std::path::PathBuf;

fn shipped_template() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("html/header.template")
}

fn receipt(title: &str) -> ReceiptBuilder {
    ReceiptBuilder::from_template_path(shipped_template(), title)
        .expect("shipped header template should load")
}

/// Byte offset of `needle` at or after `from`
fn find_from(html: &str, needle: &str, from: usize) -> usize {
    from + html[from..]
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found after byte {}", needle, from))
}

#[test]
fn test_shipped_template_has_placeholder() {
    let content = std::fs::read_to_string(shipped_template()).unwrap();
    assert_eq!(content.matches(receipt::template::TITLE_PLACEHOLDER).count(), 1);
}

#[test]
fn test_header_title_substituted() {
    let receipt = receipt("Your Receipt");
    assert!(receipt.header().contains("<title>Your Receipt</title>"));
    assert!(!receipt.header().contains(":::TITLE:::"));
    assert!(receipt.header().trim_end().ends_with("<body>"));
}

#[test]
fn test_missing_template_is_resource_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReceiptBuilder::from_template_path(dir.path().join("nope.template"), "Receipt")
        .unwrap_err();
    assert!(matches!(err, ResourceError::TemplateRead { .. }));
}

#[test]
fn test_coffee_scenario() {
    let mut receipt = receipt("Receipt");
    receipt
        .add_item_with_quantity(1, "Coffee", "$2.00")
        .add_subtotal("$2.00")
        .add_total("$2.00")
        .add_payment("Cash", "$2.00");
    let header_len = receipt.header().len();
    let html = receipt.document().to_string();

    assert!(html.starts_with(receipt.header()));

    let items_start = find_from(&html, "<table width=320>", header_len);
    let coffee = find_from(&html, "1 × Coffee", items_start);
    let items_end = find_from(&html, "</table>", coffee);
    let subtotal_start = find_from(&html, "<table width=320>", items_end);
    let subtotal = find_from(&html, "Subtotal", subtotal_start);
    let subtotal_value = find_from(&html, "$2.00", subtotal);
    let subtotal_end = find_from(&html, "</table>", subtotal_value);
    let payment_start = find_from(&html, "<table width=320>", subtotal_end);
    let total = find_from(&html, "<td>Total</td>", payment_start);
    let cash = find_from(&html, "<td>Cash</td>", total);
    let payment_end = find_from(&html, "</table>", cash);

    assert_eq!(&html[payment_end..], "</table></body></html>");
    assert_eq!(html.matches("Coffee").count(), 1);
    assert_eq!(html.matches("<table").count(), html.matches("</table>").count());
}

#[test]
fn test_close_twice_matches_close_once() {
    let build = |closes: usize| {
        let mut receipt = receipt("Receipt");
        receipt.add_item("Apple", "$1.50").add_total("$1.50");
        for _ in 0..closes {
            receipt.close();
        }
        receipt.into_document()
    };

    assert_eq!(build(1), build(2));
}

#[test]
fn test_item_then_total_closes_items_first() {
    let mut receipt = receipt("Receipt");
    receipt.add_item("Coffee", "$2.00").add_total("$2.00");
    let header_len = receipt.header().len();
    let html = receipt.document();

    let items_end = find_from(html, "</table>", header_len);
    let payment_start = find_from(html, "<table width=320>", header_len + 1);
    assert!(items_end < payment_start);
}

#[test]
fn test_payment_without_total_is_ignored() {
    let mut with_payment = receipt("Receipt");
    with_payment.add_item("Apple", "$1.50").add_payment("Cash", "$5");

    let mut without_payment = receipt("Receipt");
    without_payment.add_item("Apple", "$1.50");

    assert!(with_payment.items_open());
    assert_eq!(with_payment.document(), without_payment.document());
}

#[test]
fn test_document_is_frozen_after_read() {
    let mut receipt = receipt("Receipt");
    receipt.add_item("Apple", "$1.50");
    let first = receipt.document().to_string();

    receipt.add_message("x");
    assert_eq!(receipt.state(), DocumentState::Closed);
    assert_eq!(receipt.document(), first);
}

#[test]
fn test_reset_yields_header_only_document() {
    let mut receipt = receipt("Receipt");
    receipt
        .add_logo("logo.jpg")
        .add_item("Apple", "$1.50")
        .add_total("$1.50");
    receipt.document();

    receipt.reset();
    let header = receipt.header().to_string();
    assert_eq!(receipt.document(), format!("{}</body></html>", header));
}

#[test]
fn test_barcode_written_next_to_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut receipt = receipt("Receipt")
        .with_barcode_encoder(Box::new(PngBarcodeWriter::new(dir.path())));

    receipt
        .add_total("$1.00")
        .add_barcode("123456789", &BarcodeOptions::default());
    receipt.save(dir.path().join("receipt.html")).unwrap();

    assert!(dir.path().join("barcode.png").exists());
    let html = std::fs::read_to_string(dir.path().join("receipt.html")).unwrap();
    assert!(html.contains("src=\"barcode.png\""));
    assert!(html.find("</table>").unwrap() < html.find("barcode.png").unwrap());
}

#[test]
fn test_unencodable_barcode_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut receipt = receipt("Receipt")
        .with_barcode_encoder(Box::new(PngBarcodeWriter::new(dir.path())));
    receipt.add_message("Thank You");

    receipt.add_barcode("€100", &BarcodeOptions::default());

    let html = receipt.document();
    assert!(!html.contains("class=\"barcode\""));
    assert!(!dir.path().join("barcode.png").exists());
}

#[test]
fn test_sample_order_renders() {
    let dir = tempfile::tempdir().unwrap();
    let order = Order::sample();
    let mut receipt = ReceiptBuilder::from_template_path(shipped_template(), &order.title)
        .unwrap()
        .with_barcode_encoder(Box::new(PngBarcodeWriter::new(dir.path())));

    order.apply(&mut receipt);
    let html = receipt.into_document();

    assert!(html.contains("<title>Your Receipt</title>"));
    assert!(html.contains("3 × Peanut Butter"));
    assert!(html.contains("<td>Change</td>"));
    assert!(html.ends_with("</div></body></html>"));
    assert!(dir.path().join("barcode.png").exists());
}

#[test]
fn test_oversized_barcode_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut receipt = receipt("Receipt")
        .with_barcode_encoder(Box::new(PngBarcodeWriter::new(dir.path())));
    receipt.add_total("$1.00");

    let oversized = BarcodeOptions {
        bar_width: u32::MAX / 66,
        bar_height: u32::MAX,
        show_text: false,
    };
    let err = receipt.try_add_barcode("A", &oversized).unwrap_err();
    assert!(matches!(
        err,
        ReceiptError::Encoding(EncodingError::InvalidDimensions { .. })
    ));

    receipt.add_barcode("A", &oversized);

    assert!(receipt.payment_open());
    assert!(!dir.path().join("barcode.png").exists());
    assert!(!receipt.document().contains("class=\"barcode\""));
}
