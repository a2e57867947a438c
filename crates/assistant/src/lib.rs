//! Chat extraction adapter for the order assistant.
//!
//! This crate owns the single outbound call to the hosted chat-completion
//! service and the decoding of its replies. The assistant is instructed to
//! answer either with plain conversational text or with a JSON envelope
//! carrying a `message` plus the order fields it is updating this turn;
//! [`AssistantReply`] keeps those two shapes apart as an explicit tagged
//! value instead of exception-driven control flow.
//!
//! # Example
//!
//! ```rust,no_run
//! use assistant::{Assistant, Extractor};
//! use order_core::ChatMessage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let assistant = Assistant::from_env()?;
//!     let history = vec![ChatMessage::user("200 kg chili to Dubai, CIF")];
//!     let reply = assistant.extract(&history).await?;
//!     println!("{}", reply.message());
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;
mod error;
mod prompt;
mod reply;

pub use client::Assistant;
pub use config::{AssistantConfig, AssistantConfigBuilder};
pub use error::AssistantError;
pub use prompt::{load_system_prompt, DEFAULT_PROMPT_FILE, DEFAULT_SYSTEM_PROMPT};
pub use reply::{AssistantReply, Entities, Envelope, Meta};

// Re-export async_trait so implementors don't need a direct dependency.
pub use async_trait::async_trait;

use order_core::ChatMessage;

/// Seam between the intake flow and the extraction backend.
///
/// The production implementation is [`Assistant`]; tests substitute scripted
/// extractors.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Run one extraction turn over the full ordered history (the newest
    /// user utterance last).
    async fn extract(&self, history: &[ChatMessage]) -> Result<AssistantReply, AssistantError>;
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for std::sync::Arc<T> {
    async fn extract(&self, history: &[ChatMessage]) -> Result<AssistantReply, AssistantError> {
        (**self).extract(history).await
    }
}
