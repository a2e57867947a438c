//! WhatsApp deep-link building for order hand-off.
//!
//! After an order is submitted (or when a buyer prefers a human), the intake
//! produces a pre-filled `wa.me` link carrying a plain-text summary of the
//! record. Everything here is pure: the same record always renders the same
//! message and therefore the byte-for-byte same URL, so anyone parsing these
//! links downstream can rely on the format. Opening the link - and detecting
//! a blocked popup and degrading to a visible clickable link - is the
//! caller's job.
//!
//! # Example
//!
//! ```rust
//! use order_core::{Catalog, OrderRequest};
//!
//! let record = OrderRequest::default();
//! let url = whatsapp::order_link("94775112541", &record, Catalog::builtin());
//! assert!(url.starts_with("https://wa.me/94775112541?text="));
//! ```

use order_core::{normalize, Catalog, OrderRequest};

/// Placeholder written into the summary for fields the buyer left blank.
const BLANK: &str = "[___]";

/// Build a `wa.me` URL for a recipient with a URL-encoded message text.
pub fn build_url(recipient: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        recipient,
        urlencoding::encode(message)
    )
}

/// Quantity with its unit spelled out ("50" + cocopeat -> "50 cubes").
///
/// When the buyer already wrote a unit ("200 kg") the text is kept as
/// entered; otherwise the resolved product's unit label is appended.
fn quantity_with_unit(record: &OrderRequest, catalog: &Catalog) -> String {
    let raw = record.quantity.trim();
    if raw.is_empty() {
        return BLANK.to_string();
    }

    match normalize::parse_quantity(raw) {
        Some(qty) if qty.unit.is_none() => match catalog.resolve(&record.product) {
            Some(product) => format!("{} {}", raw, product.unit.label()),
            None => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

fn or_blank(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => BLANK,
    }
}

/// Render the stable plain-text summary of a finalized order record.
pub fn order_summary(record: &OrderRequest, catalog: &Catalog) -> String {
    let product = if record.product.trim().is_empty() {
        BLANK
    } else {
        record.product.trim()
    };
    let destination = if record.destination.trim().is_empty() {
        BLANK
    } else {
        record.destination.trim()
    };
    let buyer = if record.buyer_name.trim().is_empty() {
        BLANK
    } else {
        record.buyer_name.trim()
    };
    let email = if record.email.trim().is_empty() {
        BLANK
    } else {
        record.email.trim()
    };

    format!(
        "Order Request: {product} - Qty: {qty}, Pack: {pack}, Incoterms: {incoterms}, \
         Dest: {destination}, Date: {date}, Buyer: {buyer}, Company: {company}, \
         Email: {email}, Phone: {phone}",
        qty = quantity_with_unit(record, catalog),
        pack = or_blank(record.packaging.as_deref()),
        incoterms = or_blank(record.incoterms.as_deref()),
        date = or_blank(record.delivery_date.as_deref()),
        company = or_blank(record.company.as_deref()),
        phone = or_blank(record.phone.as_deref()),
    )
}

/// Build the notification link for a finalized order record.
pub fn order_link(recipient: &str, record: &OrderRequest, catalog: &Catalog) -> String {
    build_url(recipient, &order_summary(record, catalog))
}

/// Build the short pre-submission inquiry link shown next to the form.
pub fn inquiry_link(recipient: &str, product: Option<&str>) -> String {
    let product = match product {
        Some(name) if !name.trim().is_empty() => name.trim(),
        _ => "[PRODUCT]",
    };
    let message = format!(
        "Hello NeoGreen! I'd like to order {product} \u{2014} Quantity: {BLANK} Packaging: {BLANK} Destination: {BLANK}"
    );
    build_url(recipient, &message)
}
