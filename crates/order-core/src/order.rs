//! The canonical order record and partial updates merged into it.

use serde::{Deserialize, Serialize};

/// Submission status of an order record.
///
/// Only the creation states are modeled here; once a record is persisted,
/// any further lifecycle belongs to the fulfillment side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    #[default]
    Pending,
}

/// Field names of an [`OrderRequest`], used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Product,
    Quantity,
    Packaging,
    Destination,
    Incoterms,
    DeliveryDate,
    BuyerName,
    Company,
    Email,
    Phone,
    Notes,
}

/// The canonical record built up during intake.
///
/// A record is created empty, mutated field-by-field through
/// [`OrderRequest::apply`], validated in full at submission time, and then
/// handed to the persistence layer as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product: String,
    /// Raw quantity as entered ("200", "200 kg"); see
    /// [`normalize::parse_quantity`](crate::normalize::parse_quantity) for
    /// the decomposed form.
    pub quantity: String,
    pub packaging: Option<String>,
    pub destination: String,
    pub incoterms: Option<String>,
    /// ISO `YYYY-MM-DD` once normalized; left as entered when ambiguous.
    pub delivery_date: Option<String>,
    pub buyer_name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    /// Channel the record came in on.
    pub source: String,
}

impl Default for OrderRequest {
    fn default() -> Self {
        Self {
            product: String::new(),
            quantity: String::new(),
            packaging: None,
            destination: String::new(),
            incoterms: None,
            delivery_date: None,
            buyer_name: String::new(),
            company: None,
            email: String::new(),
            phone: None,
            notes: None,
            status: OrderStatus::default(),
            source: "web".to_string(),
        }
    }
}

/// A partial update to an [`OrderRequest`].
///
/// Produced by manual form edits and by entities decoded from assistant
/// replies. Fields left `None` are not touched by the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub product: Option<String>,
    pub quantity: Option<String>,
    pub packaging: Option<String>,
    pub destination: Option<String>,
    pub incoterms: Option<String>,
    pub delivery_date: Option<String>,
    pub buyer_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl FieldUpdate {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// The fields present in this update.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.product.is_some() {
            fields.push(Field::Product);
        }
        if self.quantity.is_some() {
            fields.push(Field::Quantity);
        }
        if self.packaging.is_some() {
            fields.push(Field::Packaging);
        }
        if self.destination.is_some() {
            fields.push(Field::Destination);
        }
        if self.incoterms.is_some() {
            fields.push(Field::Incoterms);
        }
        if self.delivery_date.is_some() {
            fields.push(Field::DeliveryDate);
        }
        if self.buyer_name.is_some() {
            fields.push(Field::BuyerName);
        }
        if self.company.is_some() {
            fields.push(Field::Company);
        }
        if self.email.is_some() {
            fields.push(Field::Email);
        }
        if self.phone.is_some() {
            fields.push(Field::Phone);
        }
        if self.notes.is_some() {
            fields.push(Field::Notes);
        }
        fields
    }

    /// Convenience constructor for a single-field update.
    pub fn single(field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut update = Self::default();
        match field {
            Field::Product => update.product = Some(value),
            Field::Quantity => update.quantity = Some(value),
            Field::Packaging => update.packaging = Some(value),
            Field::Destination => update.destination = Some(value),
            Field::Incoterms => update.incoterms = Some(value),
            Field::DeliveryDate => update.delivery_date = Some(value),
            Field::BuyerName => update.buyer_name = Some(value),
            Field::Company => update.company = Some(value),
            Field::Email => update.email = Some(value),
            Field::Phone => update.phone = Some(value),
            Field::Notes => update.notes = Some(value),
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = OrderRequest::default();
        assert_eq!(record.status, OrderStatus::Pending);
        assert_eq!(record.source, "web");
        assert!(record.product.is_empty());
        assert!(record.packaging.is_none());
    }

    #[test]
    fn test_update_fields_listing() {
        let update = FieldUpdate {
            quantity: Some("300".to_string()),
            destination: Some("Dubai".to_string()),
            ..FieldUpdate::default()
        };
        assert_eq!(update.fields(), vec![Field::Quantity, Field::Destination]);
        assert!(!update.is_empty());
        assert!(FieldUpdate::default().is_empty());
    }

    #[test]
    fn test_single_field_update() {
        let update = FieldUpdate::single(Field::Email, "a@x.com");
        assert_eq!(update.email.as_deref(), Some("a@x.com"));
        assert_eq!(update.fields(), vec![Field::Email]);
    }

    #[test]
    fn test_field_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Field::BuyerName).unwrap(),
            r#""buyer_name""#
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            r#""pending""#
        );
    }
}
