//! Assistant client for the hosted chat-completions gateway.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use order_core::ChatMessage;

use crate::api_types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::reply::AssistantReply;
use crate::Extractor;

/// The production order assistant.
///
/// Stateless between calls: the caller owns the conversation history and
/// passes the full ordered sequence on every turn. One upstream request is
/// made per [`extract`](Extractor::extract) invocation.
pub struct Assistant {
    client: Client,
    config: AssistantConfig,
}

impl Assistant {
    /// Create a new assistant with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder().build().map_err(|e| {
            AssistantError::Configuration(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// Create an assistant from environment variables.
    ///
    /// See [`AssistantConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::new(AssistantConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Build the wire messages: system instruction first, then the history.
    fn build_messages(&self, history: &[ChatMessage]) -> Vec<WireMessage> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage::system(self.config.system_prompt.clone()));
        messages.extend(history.iter().map(WireMessage::from_chat));
        messages
    }

    /// Make one chat-completion request and return the raw reply text.
    async fn chat_completion(&self, messages: Vec<WireMessage>) -> Result<String, AssistantError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %request.model, messages = request.messages.len(), "Sending extraction request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => AssistantError::RateLimited,
                402 => AssistantError::PaymentRequired,
                code => AssistantError::Upstream { status: code, body },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt = usage.prompt_tokens,
                completion = usage.completion_tokens,
                total = usage.total_tokens,
                "Token usage"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                warn!("No content in upstream response");
                AssistantError::MalformedResponse("no content in response".to_string())
            })
    }
}

#[async_trait]
impl Extractor for Assistant {
    async fn extract(&self, history: &[ChatMessage]) -> Result<AssistantReply, AssistantError> {
        let messages = self.build_messages(history);
        let raw = self.chat_completion(messages).await?;
        debug!(chars = raw.len(), "Decoding assistant reply");
        Ok(AssistantReply::decode(&raw))
    }
}
