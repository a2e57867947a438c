//! Error types for assistant operations.

use thiserror::Error;

/// Errors from one extraction turn against the upstream service.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Upstream returned HTTP 429.
    #[error("rate limited by upstream")]
    RateLimited,

    /// Upstream returned HTTP 402 (out of credits on the gateway).
    #[error("payment required by upstream")]
    PaymentRequired,

    /// Any other non-success status.
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure before a status was obtained.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Success status but a body we could not make sense of.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AssistantError {
    /// The user-facing fallback shown in chat when this turn failed.
    ///
    /// Rate-limit and quota failures get distinct wording; everything else
    /// shares the generic notice. Every variant points the buyer at the
    /// manual form and the WhatsApp contact so the session stays usable.
    pub fn fallback_message(&self, whatsapp_contact: &str) -> String {
        match self {
            AssistantError::RateLimited => {
                "I'm experiencing high traffic right now. Please try again in a moment \
                 or fill out the form manually."
                    .to_string()
            }
            AssistantError::PaymentRequired => format!(
                "I'm temporarily unavailable. Please fill out the form manually or \
                 contact us on WhatsApp: {whatsapp_contact}"
            ),
            _ => format!(
                "Sorry, I'm having trouble right now. Please fill out the form manually \
                 or contact us on WhatsApp: {whatsapp_contact}"
            ),
        }
    }
}
