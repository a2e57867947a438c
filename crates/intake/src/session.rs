//! One buyer's intake session.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use assistant::{AssistantError, Extractor};
use order_core::{
    validate, Catalog, ChatMessage, Field, FieldUpdate, IntakeProfile, OrderRequest,
};

use crate::error::IntakeError;
use crate::store::OrderStore;

/// Greeting seeded as the first assistant message of a fresh session.
pub const GREETING: &str = "\u{1F44B} Hi! I'm your order assistant. Tell me what you'd like to \
order and I'll help fill out the form. Try: \"I need 200 kg Hot Dragon chili to Dubai, 25kg \
cartons, CIF\"";

/// Where the session is in its lifecycle.
///
/// Modeled as one enum so "submitting and submitted at the same time" is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    /// Accepting edits and chat turns.
    Editing,
    /// A submission is in flight; edits and further submits are refused.
    Submitting,
    /// Terminal: the record was persisted and the hand-off link produced.
    Submitted,
}

/// Outcome of a submission attempt that ran to a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was persisted. The map carries one
    /// human-readable error per offending field.
    Rejected(BTreeMap<Field, String>),
    /// The record was persisted; the notification link is ready to open.
    Accepted { notification_url: String },
}

/// Which upstream failure class a chat fallback came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFailure {
    /// Upstream rate limit (HTTP 429).
    RateLimited,
    /// Upstream quota/payment failure (HTTP 402).
    QuotaExceeded,
    /// Any other transport, status or decode failure.
    Unavailable,
}

/// Result of one chat turn. Upstream failures are folded into a fallback
/// reply rather than surfaced as errors; the session stays usable.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    /// Assistant (or fallback) text appended to the history.
    pub reply: String,
    /// Record fields updated by this turn.
    pub updated: Vec<Field>,
    /// Set when the reply is a fallback for an upstream failure.
    pub failure: Option<ChatFailure>,
}

/// A single buyer's intake session.
///
/// Holds the one in-memory record and chat history; nothing here outlives
/// the session. All mutation goes through `&mut self`, so at most one chat
/// turn or submission can be in flight at a time.
pub struct IntakeSession<S, E> {
    store: S,
    extractor: E,
    profile: &'static IntakeProfile,
    catalog: &'static Catalog,
    whatsapp_recipient: String,
    state: IntakeState,
    record: OrderRequest,
    errors: BTreeMap<Field, String>,
    history: Vec<ChatMessage>,
}

impl<S: OrderStore, E: Extractor> IntakeSession<S, E> {
    /// Create a fresh session in the `Editing` state.
    pub fn new(
        store: S,
        extractor: E,
        profile: &'static IntakeProfile,
        whatsapp_recipient: impl Into<String>,
    ) -> Self {
        Self {
            store,
            extractor,
            profile,
            catalog: Catalog::builtin(),
            whatsapp_recipient: whatsapp_recipient.into(),
            state: IntakeState::Editing,
            record: OrderRequest::default(),
            errors: BTreeMap::new(),
            history: vec![ChatMessage::assistant(GREETING)],
        }
    }

    /// Pre-fill the product from a query parameter.
    ///
    /// Recognized values resolve to the catalog entry's display name;
    /// unrecognized values are ignored silently.
    pub fn with_product_param(mut self, param: Option<&str>) -> Self {
        if let Some(param) = param {
            if let Some(product) = self.catalog.resolve(param) {
                debug!(product = product.name, "Pre-filling product from query parameter");
                self.record.product = product.name.to_string();
            }
        }
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IntakeState {
        self.state
    }

    /// Current record snapshot.
    pub fn record(&self) -> &OrderRequest {
        &self.record
    }

    /// Errors from the last rejected submission, minus any cleared by edits.
    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    /// The conversation so far, greeting included.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// The active intake profile.
    pub fn profile(&self) -> &'static IntakeProfile {
        self.profile
    }

    /// Refuse anything but `Editing`.
    fn ensure_editing(&self) -> Result<(), IntakeError> {
        match self.state {
            IntakeState::Editing => Ok(()),
            IntakeState::Submitting => Err(IntakeError::SubmissionInFlight),
            IntakeState::Submitted => Err(IntakeError::AlreadySubmitted),
        }
    }

    /// Merge an update into the record and clear errors it addresses.
    fn apply_update(&mut self, update: &FieldUpdate) -> Vec<Field> {
        let fields = update.fields();
        self.record = self.record.apply(update);
        for field in &fields {
            self.errors.remove(field);
        }
        fields
    }

    /// Apply a manual field edit.
    pub fn edit(&mut self, update: &FieldUpdate) -> Result<&OrderRequest, IntakeError> {
        self.ensure_editing()?;
        let fields = self.apply_update(update);
        debug!(?fields, "Applied manual edit");
        Ok(&self.record)
    }

    /// Run one chat turn: send the history plus the new utterance to the
    /// extractor, merge any entities it returns, and append the reply.
    ///
    /// Upstream failures become fallback replies (distinct wording for
    /// rate-limit and quota exhaustion) and never end the session.
    pub async fn chat(&mut self, text: &str) -> Result<ChatTurn, IntakeError> {
        self.ensure_editing()?;

        self.history.push(ChatMessage::user(text));

        let turn = match self.extractor.extract(&self.history).await {
            Ok(reply) => {
                let update = reply.field_update();
                let updated = if update.is_empty() {
                    Vec::new()
                } else {
                    self.apply_update(&update)
                };
                info!(updated = updated.len(), "Chat turn extracted");
                ChatTurn {
                    reply: reply.message().to_string(),
                    updated,
                    failure: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "Extraction failed, using fallback reply");
                let failure = match err {
                    AssistantError::RateLimited => ChatFailure::RateLimited,
                    AssistantError::PaymentRequired => ChatFailure::QuotaExceeded,
                    _ => ChatFailure::Unavailable,
                };
                ChatTurn {
                    reply: err.fallback_message(&self.contact_display()),
                    updated: Vec::new(),
                    failure: Some(failure),
                }
            }
        };

        self.history.push(ChatMessage::assistant(&turn.reply));
        Ok(turn)
    }

    /// Attempt to submit the record.
    ///
    /// Validation failure and persistence failure both return the session
    /// to `Editing` - the former with per-field errors and nothing
    /// persisted, the latter with the record intact for a manual resubmit.
    /// Only after the write succeeds does the session become `Submitted`
    /// and the notification link get built.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, IntakeError> {
        self.ensure_editing()?;
        self.state = IntakeState::Submitting;

        let errors = validate(&self.record, self.catalog, self.profile);
        if !errors.is_empty() {
            info!(fields = errors.len(), "Submission rejected by validation");
            self.errors = errors.clone();
            self.state = IntakeState::Editing;
            return Ok(SubmitOutcome::Rejected(errors));
        }

        if let Err(err) = self.store.insert(&self.record).await {
            warn!(error = %err, "Order persistence failed");
            self.state = IntakeState::Editing;
            return Err(IntakeError::Store(err));
        }

        self.state = IntakeState::Submitted;
        let notification_url =
            whatsapp::order_link(&self.whatsapp_recipient, &self.record, self.catalog);
        info!(product = %self.record.product, "Order submitted");

        Ok(SubmitOutcome::Accepted { notification_url })
    }

    /// Human-readable contact used in fallback messages.
    fn contact_display(&self) -> String {
        format!("+{}", self.whatsapp_recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    use assistant::{async_trait, AssistantReply};

    use crate::store::{MemoryStore, RejectingStore};

    /// Extractor that replays a fixed script of results.
    struct ScriptedExtractor {
        replies: Mutex<VecDeque<Result<AssistantReply, AssistantError>>>,
    }

    impl ScriptedExtractor {
        fn new(replies: Vec<Result<AssistantReply, AssistantError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    #[async_trait]
    impl Extractor for ScriptedExtractor {
        async fn extract(
            &self,
            _history: &[ChatMessage],
        ) -> Result<AssistantReply, AssistantError> {
            self.replies
                .lock()
                .await
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn complete_update() -> FieldUpdate {
        FieldUpdate {
            product: Some("Premium Cocopeat (cube)".to_string()),
            quantity: Some("50".to_string()),
            destination: Some("India".to_string()),
            buyer_name: Some("A. Perera".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some("+94775112541".to_string()),
            ..FieldUpdate::default()
        }
    }

    fn session_with(
        replies: Vec<Result<AssistantReply, AssistantError>>,
    ) -> IntakeSession<MemoryStore, ScriptedExtractor> {
        IntakeSession::new(
            MemoryStore::new(),
            ScriptedExtractor::new(replies),
            IntakeProfile::relaxed(),
            "94775112541",
        )
    }

    #[tokio::test]
    async fn test_valid_record_submits_and_links() {
        let mut session = session_with(vec![]);
        session.edit(&complete_update()).unwrap();
        assert_eq!(session.state(), IntakeState::Editing);

        let outcome = session.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Accepted { notification_url } => {
                assert!(notification_url.starts_with("https://wa.me/94775112541?text="));
                assert!(notification_url.contains("50%20cubes"));
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
        assert_eq!(session.state(), IntakeState::Submitted);
        assert_eq!(session.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_validation_failure_returns_to_editing() {
        let mut session = session_with(vec![]);
        // Product and quantity only; everything else missing.
        session
            .edit(&FieldUpdate {
                product: Some("Organic Worm Compost".to_string()),
                quantity: Some("50".to_string()),
                ..FieldUpdate::default()
            })
            .unwrap();

        match session.submit().await.unwrap() {
            SubmitOutcome::Rejected(errors) => {
                assert!(errors.contains_key(&Field::Destination));
                assert!(errors.contains_key(&Field::BuyerName));
                assert!(errors.contains_key(&Field::Email));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(session.state(), IntakeState::Editing);
        assert!(session.store.is_empty().await);

        // Fixing the fields clears their errors and the resubmit succeeds.
        session.edit(&complete_update()).unwrap();
        assert!(session.errors().is_empty());
        assert!(matches!(
            session.submit().await.unwrap(),
            SubmitOutcome::Accepted { .. }
        ));
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_record() {
        let mut session = IntakeSession::new(
            RejectingStore,
            ScriptedExtractor::new(vec![]),
            IntakeProfile::relaxed(),
            "94775112541",
        );
        session.edit(&complete_update()).unwrap();

        let result = session.submit().await;
        assert!(matches!(result, Err(IntakeError::Store(_))));
        assert_eq!(session.state(), IntakeState::Editing);
        // Record intact for resubmission without re-entering data.
        assert_eq!(session.record().product, "Premium Cocopeat (cube)");
        assert_eq!(session.record().quantity, "50");
    }

    #[tokio::test]
    async fn test_submitted_is_terminal() {
        let mut session = session_with(vec![]);
        session.edit(&complete_update()).unwrap();
        session.submit().await.unwrap();

        assert!(matches!(
            session.submit().await,
            Err(IntakeError::AlreadySubmitted)
        ));
        assert!(matches!(
            session.edit(&complete_update()),
            Err(IntakeError::AlreadySubmitted)
        ));
        assert!(matches!(
            session.chat("hello?").await,
            Err(IntakeError::AlreadySubmitted)
        ));
    }

    #[tokio::test]
    async fn test_chat_plain_text_has_no_updates() {
        let mut session = session_with(vec![Ok(AssistantReply::decode("Sure, happy to help!"))]);

        let turn = session.chat("hi").await.unwrap();
        assert_eq!(turn.reply, "Sure, happy to help!");
        assert!(turn.updated.is_empty());
        assert!(turn.failure.is_none());
        assert_eq!(session.record(), &OrderRequest::default());

        // Greeting + user + assistant.
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history()[1], ChatMessage::user("hi"));
    }

    #[tokio::test]
    async fn test_chat_envelope_merges_entities() {
        let mut session = session_with(vec![Ok(AssistantReply::decode(
            r#"{"message":"Got it","entities":{"quantity":"200 kg"}}"#,
        ))]);
        session
            .edit(&FieldUpdate {
                quantity: Some("100".to_string()),
                destination: Some("Dubai".to_string()),
                ..FieldUpdate::default()
            })
            .unwrap();

        let turn = session.chat("make it 200 kg").await.unwrap();
        assert_eq!(turn.reply, "Got it");
        assert_eq!(turn.updated, vec![Field::Quantity]);
        assert_eq!(session.record().quantity, "200 kg");
        // Other fields untouched.
        assert_eq!(session.record().destination, "Dubai");
    }

    #[tokio::test]
    async fn test_chat_rate_limit_fallback() {
        let mut session = session_with(vec![Err(AssistantError::RateLimited)]);

        let turn = session.chat("200 kg chili").await.unwrap();
        assert_eq!(turn.failure, Some(ChatFailure::RateLimited));
        assert!(turn.updated.is_empty());
        assert!(turn.reply.contains("high traffic"));
        // Fallback reply lands in the history; record untouched.
        assert_eq!(session.history().last().unwrap().content, turn.reply);
        assert_eq!(session.record(), &OrderRequest::default());
    }

    #[tokio::test]
    async fn test_chat_quota_and_generic_fallbacks_are_distinct() {
        let mut session = session_with(vec![
            Err(AssistantError::PaymentRequired),
            Err(AssistantError::Upstream {
                status: 503,
                body: "unavailable".to_string(),
            }),
        ]);

        let quota = session.chat("hello").await.unwrap();
        assert_eq!(quota.failure, Some(ChatFailure::QuotaExceeded));
        assert!(quota.reply.contains("+94775112541"));

        let generic = session.chat("hello again").await.unwrap();
        assert_eq!(generic.failure, Some(ChatFailure::Unavailable));
        assert_ne!(quota.reply, generic.reply);
    }

    #[tokio::test]
    async fn test_edit_clears_field_error() {
        let mut session = session_with(vec![]);
        session.submit().await.unwrap(); // empty record -> rejected
        assert!(session.errors().contains_key(&Field::Email));

        session
            .edit(&FieldUpdate::single(Field::Email, "a@x.com"))
            .unwrap();
        assert!(!session.errors().contains_key(&Field::Email));
        // Untouched fields keep their errors.
        assert!(session.errors().contains_key(&Field::Product));
    }

    #[test]
    fn test_product_param_prefill() {
        let session = session_with(vec![]).with_product_param(Some("cocopeat"));
        assert_eq!(session.record().product, "Premium Cocopeat (cube)");

        // Unrecognized values are ignored silently.
        let session = session_with(vec![]).with_product_param(Some("bananas"));
        assert!(session.record().product.is_empty());

        let session = session_with(vec![]).with_product_param(None);
        assert!(session.record().product.is_empty());
    }

    #[test]
    fn test_greeting_seeds_history() {
        let session = session_with(vec![]);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0], ChatMessage::assistant(GREETING));
    }
}
