//! Completion client and its test double.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use parley_common::{OutputListener, OutputTracker};

use crate::client::JsonHttpClient;
use crate::error::ClientError;
use crate::openai::{CompletionMessage, CompletionRequest, CompletionResponse};
use crate::stub::StubResponse;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const TEMPERATURE: f64 = 0.7;

/// A prompt sent through [`OpenAiClient::prompt`], recorded for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(pub String);

/// Client for one-shot prompts against the chat-completions API.
///
/// Built on [`JsonHttpClient`], so the same construction choice applies:
/// [`OpenAiClient::new`] talks to the real API, while the stubbed
/// constructors answer from a canned completion without network I/O.
pub struct OpenAiClient {
    http_client: JsonHttpClient,
    api_key: SecretString,
    prompts: OutputListener<Prompt>,
}

// Keeps the API key out of debug output.
impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"[REDACTED]")
            .field("http_client", &self.http_client)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client that talks to the real chat-completions endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(JsonHttpClient::new(), api_key)
    }

    /// Creates a client on top of an existing [`JsonHttpClient`].
    ///
    /// This is the seam tests use to observe outgoing requests: hand in a
    /// stubbed client and keep its `track_requests` view.
    #[must_use]
    pub fn with_http_client(http_client: JsonHttpClient, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: SecretString::from(api_key.into()),
            prompts: OutputListener::new(),
        }
    }

    /// Creates a stubbed client whose every prompt is answered with
    /// `"stubbed_openai_response"`.
    #[must_use]
    pub fn stubbed() -> Self {
        Self::stubbed_with_answer("stubbed_openai_response")
    }

    /// Creates a stubbed client whose every prompt is answered with
    /// `answer`.
    #[must_use]
    pub fn stubbed_with_answer(answer: &str) -> Self {
        let http_client = JsonHttpClient::stubbed_with([(
            COMPLETIONS_URL.to_string(),
            StubResponse::from(canned_completion(answer)),
        )]);
        Self::with_http_client(http_client, "stubbed_api_key")
    }

    /// Sends `prompt` as a single user message and returns the answer text.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from the underlying client, and fails
    /// with [`ClientError::InvalidResponse`] when the provider returns no
    /// choices.
    pub async fn prompt(&self, prompt: &str) -> Result<String, ClientError> {
        self.prompts.emit(Prompt(prompt.to_string()));

        let headers = HashMap::from([
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key.expose_secret()),
            ),
            (
                "Content-Type".to_string(),
                "application/json".to_string(),
            ),
        ]);
        let request = CompletionRequest {
            model: MODEL.to_string(),
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
        };

        let response: CompletionResponse = self
            .http_client
            .post(COMPLETIONS_URL, &headers, &request)
            .await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ClientError::InvalidResponse("completion response contained no choices".to_string())
        })?;

        Ok(choice.message.content)
    }

    /// Returns a view over every prompt sent through this client.
    #[must_use]
    pub fn track_prompts(&self) -> OutputTracker<Prompt> {
        self.prompts.create_tracker()
    }

    /// Fully resolved URL this client posts to.
    #[must_use]
    pub const fn completions_url() -> &'static str {
        COMPLETIONS_URL
    }
}

/// Builds a syntactically complete completion response around `answer`.
/// Everything except the answer text is filler the caller never reads.
fn canned_completion(answer: &str) -> serde_json::Value {
    json!({
        "id": "stubbed_id",
        "object": "stubbed_object",
        "created": 42,
        "model": "stubbed_model",
        "usage": {"prompt_tokens": 42, "completion_tokens": 42, "total_tokens": 42},
        "choices": [{
            "message": {"role": "assistant", "content": answer},
            "finish_reason": "stubbed_reason",
            "index": 42
        }]
    })
}
