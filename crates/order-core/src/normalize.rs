//! Order normalization: merging partial updates and canonicalizing values.
//!
//! The merge policy is last-write-wins per field regardless of source
//! (manual edit or chat extraction). Changing the product does NOT clear
//! dependent fields here; whether the surviving packaging or quantity unit
//! still makes sense is re-decided by [`validate`](crate::validate) on the
//! next pass.

use chrono::NaiveDate;

use crate::order::{FieldUpdate, OrderRequest};

/// A quantity decomposed into numeric value and optional unit text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub value: f64,
    /// Unit as written ("kg", "bags"); `None` when the buyer gave a bare number.
    pub unit: Option<String>,
}

/// A packaging descriptor decomposed into size and container type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPackaging {
    /// Canonical size, e.g. "25 kg".
    pub size: String,
    /// Container type: bag, carton, sack, bale or block.
    pub kind: String,
}

impl OrderRequest {
    /// Merge a partial update into this record, returning the new record.
    ///
    /// Fields present in the update always overwrite the current value;
    /// fields absent from the update are left untouched. The returned record
    /// is an independent value so callers can keep earlier snapshots.
    pub fn apply(&self, update: &FieldUpdate) -> OrderRequest {
        let mut next = self.clone();

        if let Some(product) = &update.product {
            next.product = product.trim().to_string();
        }
        if let Some(quantity) = &update.quantity {
            next.quantity = quantity.trim().to_string();
        }
        if let Some(packaging) = &update.packaging {
            next.packaging = Some(packaging.trim().to_string());
        }
        if let Some(destination) = &update.destination {
            next.destination = destination.trim().to_string();
        }
        if let Some(incoterms) = &update.incoterms {
            // Canonical uppercase when the term is in the accepted set,
            // otherwise kept as entered for clarification.
            next.incoterms = Some(
                normalize_incoterm(incoterms).unwrap_or_else(|| incoterms.trim().to_string()),
            );
        }
        if let Some(date) = &update.delivery_date {
            next.delivery_date =
                Some(normalize_date(date).unwrap_or_else(|| date.trim().to_string()));
        }
        if let Some(buyer_name) = &update.buyer_name {
            next.buyer_name = buyer_name.trim().to_string();
        }
        if let Some(company) = &update.company {
            next.company = Some(company.trim().to_string());
        }
        if let Some(email) = &update.email {
            next.email = email.trim().to_string();
        }
        if let Some(phone) = &update.phone {
            next.phone = Some(phone.trim().to_string());
        }
        if let Some(notes) = &update.notes {
            next.notes = Some(notes.trim().to_string());
        }

        next
    }
}

/// Decompose a raw quantity string into value and unit.
///
/// Accepts "200", "200 kg", "50 bags", "25kg". Returns `None` when no
/// leading numeric value can be found.
pub fn parse_quantity(raw: &str) -> Option<ParsedQuantity> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let numeric_len = raw
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+')
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    let value: f64 = raw[..numeric_len].parse().ok()?;
    let unit = raw[numeric_len..].trim();

    Some(ParsedQuantity {
        value,
        unit: if unit.is_empty() {
            None
        } else {
            Some(unit.to_lowercase())
        },
    })
}

/// Container types recognized in packaging descriptors.
const PACKAGING_KINDS: &[&str] = &["bag", "carton", "sack", "bale", "block", "cube"];

/// Decompose a packaging descriptor like "25kg bag", "25 kg cartons" or
/// "5kg blocks (Washed)" into `{size, kind}`.
pub fn parse_packaging(raw: &str) -> Option<ParsedPackaging> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let kind = PACKAGING_KINDS
        .iter()
        .find(|k| lowered.contains(*k))?
        .to_string();

    let qty = parse_quantity(&lowered)?;
    // Packaging sizes are weights; normalize the common "25kg" spelling.
    let size = if qty.value.fract() == 0.0 {
        format!("{} kg", qty.value as i64)
    } else {
        format!("{} kg", qty.value)
    };

    Some(ParsedPackaging { size, kind })
}

/// Normalize a delivery-terms string to the canonical uppercase set
/// {EXW, FCA, FOB, CFR, CIF, DAP, DDP}. Returns `None` for anything else.
pub fn normalize_incoterm(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    crate::Catalog::builtin()
        .incoterms()
        .iter()
        .find(|t| **t == upper)
        .map(|t| t.to_string())
}

/// Normalize a date string to ISO `YYYY-MM-DD` when it is unambiguous.
///
/// ISO dates and day-month-year forms with an unambiguous day (>12) are
/// accepted; "03/04/2026" could be March or April and returns `None` so
/// the assistant can ask for clarification.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }

    for format in ["%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    // Slash forms: only unambiguous when exactly one of day-first /
    // month-first parses.
    for separator in ['/', '.'] {
        let day_first = format!("%d{separator}%m{separator}%Y");
        let month_first = format!("%m{separator}%d{separator}%Y");
        match (
            NaiveDate::parse_from_str(raw, &day_first),
            NaiveDate::parse_from_str(raw, &month_first),
        ) {
            (Ok(a), Ok(b)) if a == b => return Some(a.format("%Y-%m-%d").to_string()),
            (Ok(_), Ok(_)) => return None,
            (Ok(a), Err(_)) => return Some(a.format("%Y-%m-%d").to_string()),
            (Err(_), Ok(b)) => return Some(b.format("%Y-%m-%d").to_string()),
            (Err(_), Err(_)) => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::FieldUpdate;

    #[test]
    fn test_merge_last_write_wins() {
        let record = OrderRequest::default().apply(&FieldUpdate {
            quantity: Some("200".to_string()),
            destination: Some("Dubai".to_string()),
            ..FieldUpdate::default()
        });

        let merged = record.apply(&FieldUpdate {
            quantity: Some("300".to_string()),
            ..FieldUpdate::default()
        });

        assert_eq!(merged.quantity, "300");
        assert_eq!(merged.destination, "Dubai");
        // Earlier snapshot unaffected.
        assert_eq!(record.quantity, "200");
    }

    #[test]
    fn test_merge_does_not_clear_dependents_on_product_change() {
        let record = OrderRequest::default().apply(&FieldUpdate {
            product: Some("Organic Worm Compost".to_string()),
            packaging: Some("25kg bags".to_string()),
            ..FieldUpdate::default()
        });

        let merged = record.apply(&FieldUpdate {
            product: Some("Premium Cocopeat (cube)".to_string()),
            ..FieldUpdate::default()
        });

        assert_eq!(merged.packaging.as_deref(), Some("25kg bags"));
    }

    #[test]
    fn test_merge_normalizes_incoterm_and_date() {
        let record = OrderRequest::default().apply(&FieldUpdate {
            incoterms: Some("fob".to_string()),
            delivery_date: Some("15 March 2026".to_string()),
            ..FieldUpdate::default()
        });

        assert_eq!(record.incoterms.as_deref(), Some("FOB"));
        assert_eq!(record.delivery_date.as_deref(), Some("2026-03-15"));
    }

    #[test]
    fn test_merge_keeps_unrecognized_incoterm_as_entered() {
        let record = OrderRequest::default().apply(&FieldUpdate {
            incoterms: Some("FOBX".to_string()),
            ..FieldUpdate::default()
        });
        assert_eq!(record.incoterms.as_deref(), Some("FOBX"));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(
            parse_quantity("200 kg"),
            Some(ParsedQuantity {
                value: 200.0,
                unit: Some("kg".to_string())
            })
        );
        assert_eq!(
            parse_quantity("50"),
            Some(ParsedQuantity {
                value: 50.0,
                unit: None
            })
        );
        assert_eq!(
            parse_quantity("25kg").unwrap().unit.as_deref(),
            Some("kg")
        );
        assert_eq!(parse_quantity("-2").unwrap().value, -2.0);
        assert!(parse_quantity("abc").is_none());
        assert!(parse_quantity("").is_none());
    }

    #[test]
    fn test_parse_packaging() {
        assert_eq!(
            parse_packaging("25kg bag"),
            Some(ParsedPackaging {
                size: "25 kg".to_string(),
                kind: "bag".to_string()
            })
        );
        assert_eq!(
            parse_packaging("25 kg cartons").unwrap().kind,
            "carton"
        );
        assert_eq!(
            parse_packaging("5kg blocks (Washed)").unwrap(),
            ParsedPackaging {
                size: "5 kg".to_string(),
                kind: "block".to_string()
            }
        );
        assert!(parse_packaging("loose").is_none());
    }

    #[test]
    fn test_normalize_incoterm() {
        assert_eq!(normalize_incoterm("cif").as_deref(), Some("CIF"));
        assert_eq!(normalize_incoterm(" DAP ").as_deref(), Some("DAP"));
        assert!(normalize_incoterm("FOBX").is_none());
        assert!(normalize_incoterm("").is_none());
    }

    #[test]
    fn test_normalize_date_unambiguous() {
        assert_eq!(normalize_date("2026-03-15").as_deref(), Some("2026-03-15"));
        assert_eq!(normalize_date("15/03/2026").as_deref(), Some("2026-03-15"));
        assert_eq!(normalize_date("15 March 2026").as_deref(), Some("2026-03-15"));
        assert_eq!(normalize_date("March 15, 2026").as_deref(), Some("2026-03-15"));
    }

    #[test]
    fn test_normalize_date_ambiguous_left_alone() {
        // Could be 3 April or 4 March.
        assert!(normalize_date("03/04/2026").is_none());
        assert!(normalize_date("next month").is_none());
    }
}
