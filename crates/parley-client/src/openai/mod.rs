//! OpenAI chat-completions client built on the JSON HTTP facade.
//!
//! Wire types mirror the chat-completions JSON schema closely enough to
//! serialize requests and pull the answer text out of responses; nothing
//! else about the schema matters here.

use serde::{Deserialize, Serialize};

mod client;

pub use client::{OpenAiClient, Prompt};

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `gpt-3.5-turbo`.
    pub model: String,
    /// Conversation so far; a single user message for one-shot prompts.
    pub messages: Vec<CompletionMessage>,
    /// Sampling temperature.
    pub temperature: f64,
}

/// One message in a chat-completions conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    /// Message author role, e.g. `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Response body from the chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned response id.
    pub id: String,
    /// Object type marker, e.g. `chat.completion`.
    pub object: String,
    /// Unix timestamp of creation.
    pub created: u64,
    /// Model that produced the response.
    pub model: String,
    /// Token accounting.
    pub usage: Usage,
    /// Candidate answers; the first one is the reply.
    pub choices: Vec<Choice>,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated for the completion.
    pub completion_tokens: u32,
    /// Sum of prompt and completion tokens.
    pub total_tokens: u32,
}

/// One candidate completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: CompletionMessage,
    /// Why generation stopped, e.g. `stop` or `length`.
    pub finish_reason: String,
    /// Position of this choice in the candidate list.
    pub index: u32,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn response_body_deserializes_from_provider_json() {
        let body = json!({
            "id": "chatcmpl-7LcIqfBQeihcsnuXgGZg8Pekqky8z",
            "object": "chat.completion",
            "created": 1_685_386_480_u64,
            "model": "gpt-3.5-turbo-0301",
            "usage": {"prompt_tokens": 37, "completion_tokens": 183, "total_tokens": 220},
            "choices": [{
                "message": {"role": "assistant", "content": "A positive attitude."},
                "finish_reason": "stop",
                "index": 0
            }]
        });

        let response: CompletionResponse = serde_json::from_value(body).unwrap();

        assert_eq!(response.model, "gpt-3.5-turbo-0301");
        assert_eq!(response.usage.total_tokens, 220);
        assert_eq!(response.choices[0].message.content, "A positive attitude.");
        assert_eq!(response.choices[0].finish_reason, "stop");
    }

    #[test]
    fn request_body_serializes_with_wire_field_names() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: "my_prompt".to_string(),
            }],
            temperature: 0.7,
        };

        let serialized = serde_json::to_value(&request).unwrap();

        assert_eq!(
            serialized,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "my_prompt"}],
                "temperature": 0.7
            })
        );
    }
}
