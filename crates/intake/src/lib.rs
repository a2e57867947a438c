//! Order intake session flow.
//!
//! This crate coordinates one buyer's intake session end-to-end: manual
//! field edits and chat-extracted entities are merged into a single
//! in-memory [`OrderRequest`](order_core::OrderRequest), validation gates
//! submission, and a successful persistence write produces the WhatsApp
//! hand-off link.
//!
//! # State machine
//!
//! ```text
//!            edit / chat
//!            ┌────────┐
//!            ▼        │
//!         ┌─────────────┐   submit    ┌────────────┐  insert ok  ┌───────────┐
//!         │   Editing   │ ──────────► │ Submitting │ ──────────► │ Submitted │
//!         └─────────────┘             └────────────┘             └───────────┘
//!            ▲        ▲                  │       │
//!            │        └── validation ────┘       │
//!            └─────────── insert failed ─────────┘
//! ```
//!
//! Validation failures return to `Editing` with per-field errors and nothing
//! persisted; persistence failures return to `Editing` with the record
//! intact so the buyer can resubmit. `Submitted` is terminal for the
//! session.
//!
//! # Example
//!
//! ```rust
//! use assistant::{AssistantError, AssistantReply, Extractor};
//! use intake::{IntakeSession, MemoryStore, SubmitOutcome};
//! use order_core::{FieldUpdate, IntakeProfile};
//!
//! struct Offline;
//!
//! #[assistant::async_trait]
//! impl Extractor for Offline {
//!     async fn extract(
//!         &self,
//!         _history: &[order_core::ChatMessage],
//!     ) -> Result<AssistantReply, AssistantError> {
//!         Err(AssistantError::RateLimited)
//!     }
//! }
//!
//! # async fn example() -> Result<(), intake::IntakeError> {
//! let mut session = IntakeSession::new(
//!     MemoryStore::new(),
//!     Offline,
//!     IntakeProfile::relaxed(),
//!     "94775112541",
//! );
//!
//! session.edit(&FieldUpdate {
//!     product: Some("Organic Worm Compost".to_string()),
//!     quantity: Some("50".to_string()),
//!     destination: Some("Maldives".to_string()),
//!     buyer_name: Some("A. Perera".to_string()),
//!     email: Some("a@x.com".to_string()),
//!     ..FieldUpdate::default()
//! })?;
//!
//! match session.submit().await? {
//!     SubmitOutcome::Accepted { notification_url } => println!("{notification_url}"),
//!     SubmitOutcome::Rejected(errors) => println!("{} fields to fix", errors.len()),
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod session;
mod store;

pub use error::IntakeError;
pub use session::{ChatFailure, ChatTurn, IntakeSession, IntakeState, SubmitOutcome, GREETING};
pub use store::{MemoryStore, OrderStore, RejectingStore, StoreError};
