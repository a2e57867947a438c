//! Decoding of assistant replies.
//!
//! The model is instructed to answer either with plain conversational text
//! or with a single JSON envelope. Both shapes are first-class here: decode
//! never fails, it just lands on [`AssistantReply::PlainText`] when the body
//! is not a parseable envelope.

use serde::{Deserialize, Serialize};

use order_core::FieldUpdate;

/// Order fields the model may update in one turn.
///
/// Every key is optional; the model only emits what changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub product: Option<String>,
    pub variety: Option<String>,
    pub quantity: Option<String>,
    pub packaging: Option<String>,
    pub packaging_option: Option<String>,
    pub destination_country: Option<String>,
    pub incoterms: Option<String>,
    pub target_date: Option<String>,
    pub buyer_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Extraction metadata attached to an envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Fields still needed before the order is submittable.
    #[serde(default)]
    pub missing: Vec<String>,
    /// Model's own confidence in this turn's extraction.
    pub confidence: Option<f32>,
}

/// The structured envelope the model emits when it has field updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub message: String,
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl Envelope {
    /// Convert the entities into a merge update for the order record.
    ///
    /// `variety` is folded into the product string and `packaging_option`
    /// into the packaging string, mirroring how the intake form displays
    /// those qualifiers.
    pub fn field_update(&self) -> FieldUpdate {
        let entities = &self.entities;

        let product = entities.product.as_ref().map(|product| {
            match &entities.variety {
                Some(variety) if !variety.trim().is_empty() => {
                    format!("{} ({})", product, variety.trim())
                }
                _ => product.clone(),
            }
        });

        let packaging = entities.packaging.as_ref().map(|packaging| {
            match &entities.packaging_option {
                Some(option) if !option.trim().is_empty() => {
                    format!("{} ({})", packaging, option.trim())
                }
                _ => packaging.clone(),
            }
        });

        FieldUpdate {
            product,
            quantity: entities.quantity.clone(),
            packaging,
            destination: entities.destination_country.clone(),
            incoterms: entities.incoterms.clone(),
            delivery_date: entities.target_date.clone(),
            buyer_name: entities.buyer_name.clone(),
            company: entities.company.clone(),
            email: entities.email.clone(),
            phone: entities.phone.clone(),
            notes: entities.notes.clone(),
        }
    }
}

/// A decoded assistant reply: either the structured envelope or plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantReply {
    Structured(Envelope),
    PlainText(String),
}

impl AssistantReply {
    /// Decode a raw reply body.
    ///
    /// Anything that does not parse as the envelope is treated as a plain
    /// conversational message with no field updates.
    pub fn decode(raw: &str) -> AssistantReply {
        match serde_json::from_str::<Envelope>(raw.trim()) {
            Ok(envelope) => AssistantReply::Structured(envelope),
            Err(_) => AssistantReply::PlainText(raw.to_string()),
        }
    }

    /// The conversational text to append to the chat history.
    pub fn message(&self) -> &str {
        match self {
            AssistantReply::Structured(envelope) => &envelope.message,
            AssistantReply::PlainText(text) => text,
        }
    }

    /// The merge update carried by this reply (empty for plain text).
    pub fn field_update(&self) -> FieldUpdate {
        match self {
            AssistantReply::Structured(envelope) => envelope.field_update(),
            AssistantReply::PlainText(_) => FieldUpdate::default(),
        }
    }
}
