//! Core domain types for the NeoGreen export order intake.
//!
//! This crate provides the shared vocabulary for the whole intake pipeline:
//!
//! - [`OrderRequest`] / [`FieldUpdate`] - the canonical order record and the
//!   partial updates (manual edits or chat-extracted entities) merged into it
//! - [`Catalog`] / [`Product`] - the immutable product catalog, loaded once
//! - [`IntakeProfile`] - named configuration selecting which fields are
//!   required and which option lists are closed
//! - [`validate`] - pure submission rules producing a per-field error map
//! - [`normalize`] - quantity/packaging/incoterm/date normalization helpers
//!
//! # Example
//!
//! ```rust
//! use order_core::{Catalog, FieldUpdate, IntakeProfile, OrderRequest};
//!
//! let catalog = Catalog::builtin();
//! let profile = IntakeProfile::relaxed();
//!
//! let record = OrderRequest::default().apply(&FieldUpdate {
//!     product: Some("Organic Worm Compost".to_string()),
//!     quantity: Some("50 bags".to_string()),
//!     ..FieldUpdate::default()
//! });
//!
//! let errors = order_core::validate(&record, catalog, profile);
//! assert!(errors.contains_key(&order_core::Field::Destination));
//! ```

mod catalog;
mod chat;
pub mod normalize;
mod order;
mod profile;
mod validate;

pub use catalog::{Catalog, Product, QuantityUnit};
pub use chat::{ChatMessage, Role};
pub use order::{Field, FieldUpdate, OrderRequest, OrderStatus};
pub use profile::{IntakeProfile, UnknownProfile};
pub use validate::validate;
