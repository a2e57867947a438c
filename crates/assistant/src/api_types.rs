//! Wire types for the upstream chat-completions endpoint.

use serde::{Deserialize, Serialize};

/// A chat message as the upstream API expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    pub content: String,
}

impl WireMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a message from an intake chat message.
    pub fn from_chat(message: &order_core::ChatMessage) -> Self {
        Self {
            role: match message.role {
                order_core::Role::User => "user".to_string(),
                order_core::Role::Assistant => "assistant".to_string(),
            },
            content: message.content.clone(),
        }
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Chat completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// The message inside a choice. Content may be null on some failure shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Token usage information, logged when present.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_core::ChatMessage;

    #[test]
    fn test_from_chat_roles() {
        assert_eq!(WireMessage::from_chat(&ChatMessage::user("hi")).role, "user");
        assert_eq!(
            WireMessage::from_chat(&ChatMessage::assistant("hello")).role,
            "assistant"
        );
    }

    #[test]
    fn test_request_omits_unset_options() {
        let request = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![WireMessage::system("s")],
            max_tokens: None,
            temperature: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_response_parses_minimal_body() {
        let body = r#"{"choices":[{"message":{"content":"hi"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("hi")
        );
        assert!(response.usage.is_none());
    }
}
