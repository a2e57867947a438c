//! Configuration for the order assistant.

use std::env;

use crate::error::AssistantError;
use crate::prompt::load_system_prompt;

/// Configuration for [`Assistant`](crate::Assistant).
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Base URL of the chat-completions gateway.
    pub api_url: String,

    /// Bearer credential for the gateway.
    pub api_key: String,

    /// Model name to request.
    pub model: String,

    /// System instruction sent as the first message of every call.
    pub system_prompt: String,

    /// Maximum tokens for the reply.
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://ai.gateway.lovable.dev".to_string(),
            api_key: String::new(),
            model: "google/gemini-2.5-flash".to_string(),
            system_prompt: crate::prompt::DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.2),
        }
    }
}

impl AssistantConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `ASSISTANT_API_KEY` - bearer credential for the gateway
    ///
    /// Optional:
    /// - `ASSISTANT_API_URL` - gateway base URL (default: https://ai.gateway.lovable.dev)
    /// - `ASSISTANT_MODEL` - model name (default: google/gemini-2.5-flash)
    /// - `ASSISTANT_SYSTEM_PROMPT` / `ASSISTANT_PROMPT_FILE` - prompt override
    /// - `ASSISTANT_MAX_TOKENS` - max tokens (default: 1024)
    /// - `ASSISTANT_TEMPERATURE` - temperature (default: 0.2)
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("ASSISTANT_API_KEY")
            .map_err(|_| AssistantError::Configuration("ASSISTANT_API_KEY not set".to_string()))?;

        let api_url = env::var("ASSISTANT_API_URL")
            .unwrap_or_else(|_| "https://ai.gateway.lovable.dev".to_string());

        let model = env::var("ASSISTANT_MODEL")
            .unwrap_or_else(|_| "google/gemini-2.5-flash".to_string());

        let system_prompt = load_system_prompt();

        let max_tokens = env::var("ASSISTANT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("ASSISTANT_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.2));

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }
}

/// Builder for [`AssistantConfig`].
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the gateway base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AssistantConfig {
        self.config
    }
}
