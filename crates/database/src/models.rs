//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use order_core::{OrderRequest, OrderStatus};

/// A persisted order request row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderRow {
    /// Auto-incrementing ID.
    pub id: i64,
    pub product: String,
    pub quantity: String,
    pub packaging: Option<String>,
    pub destination: String,
    pub incoterms: Option<String>,
    pub delivery_date: Option<String>,
    pub buyer_name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    /// Submission status ("new" or "pending").
    pub status: String,
    /// Channel the record came in on.
    pub source: String,
    /// Insertion timestamp.
    pub created_at: String,
}

impl OrderRow {
    /// Reconstruct the in-memory record shape from this row.
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest {
            product: self.product.clone(),
            quantity: self.quantity.clone(),
            packaging: self.packaging.clone(),
            destination: self.destination.clone(),
            incoterms: self.incoterms.clone(),
            delivery_date: self.delivery_date.clone(),
            buyer_name: self.buyer_name.clone(),
            company: self.company.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            notes: self.notes.clone(),
            status: match self.status.as_str() {
                "new" => OrderStatus::New,
                _ => OrderStatus::Pending,
            },
            source: self.source.clone(),
        }
    }
}
