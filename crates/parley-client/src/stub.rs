//! In-memory transport for tests.
//!
//! A [`StubTransport`] answers requests from a configuration built at
//! construction time and performs no network I/O. Each configured URL maps
//! to either a single value returned on every call, or a finite sequence
//! consumed one element per call. Resolution is by exact string match on
//! the fully resolved URL, query string included.
//!
//! There is deliberately no default response for unconfigured URLs: a
//! context-specific payload cannot be safely guessed, so absence of
//! configuration is always a hard failure.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::Transport;
use crate::error::ClientError;

/// Configured response(s) for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubResponse {
    /// Returned on every call, indefinitely.
    Scalar(Value),
    /// Returned one element per call, in order; calls past the end fail.
    Sequence(Vec<Value>),
}

impl From<Value> for StubResponse {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Value>> for StubResponse {
    fn from(values: Vec<Value>) -> Self {
        Self::Sequence(values)
    }
}

/// Per-URL resolution state.
///
/// Scalars never change; sequences hold the cursor directly as a queue
/// that pops from the front. An empty queue means exhausted, which is a
/// different failure from an unknown URL.
#[derive(Debug)]
enum ConfiguredResponse {
    Scalar(Value),
    Sequence(VecDeque<Value>),
}

impl From<StubResponse> for ConfiguredResponse {
    fn from(response: StubResponse) -> Self {
        match response {
            StubResponse::Scalar(value) => Self::Scalar(value),
            StubResponse::Sequence(values) => Self::Sequence(values.into()),
        }
    }
}

/// Transport that resolves responses from in-memory configuration.
///
/// Cursor state is private to the instance; two stubs configured from the
/// same input advance independently.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, ConfiguredResponse>>,
}

impl StubTransport {
    /// Creates a stub with no configured URLs. Every call fails with
    /// [`ClientError::UnconfiguredUrl`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stub answering from the given URL-to-response mapping.
    #[must_use]
    pub fn configured<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = (String, StubResponse)>,
    {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(url, response)| (url, response.into()))
                    .collect(),
            ),
        }
    }

    fn next_response(&self, url: &str) -> Result<Value, ClientError> {
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match responses.get_mut(url) {
            None => Err(ClientError::UnconfiguredUrl(url.to_string())),
            Some(ConfiguredResponse::Scalar(value)) => Ok(value.clone()),
            Some(ConfiguredResponse::Sequence(queue)) => queue
                .pop_front()
                .ok_or_else(|| ClientError::ExhaustedResponses(url.to_string())),
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<Value, ClientError> {
        self.next_response(url)
    }

    // Headers and body were already captured by the facade's request
    // descriptor; they play no part in response selection.
    async fn post(
        &self,
        url: &str,
        _headers: &HashMap<String, String>,
        _body: &Value,
    ) -> Result<Value, ClientError> {
        self.next_response(url)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn scalar_entries_never_exhaust() {
        let stub = StubTransport::configured([(
            "/config".to_string(),
            StubResponse::from(json!("A")),
        )]);

        for _ in 0..5 {
            assert_eq!(stub.get("/config").await.unwrap(), json!("A"));
        }
    }

    #[tokio::test]
    async fn sequence_entries_stay_exhausted_forever() {
        let stub = StubTransport::configured([(
            "/list".to_string(),
            StubResponse::from(vec![json!("X")]),
        )]);

        assert_eq!(stub.get("/list").await.unwrap(), json!("X"));

        for _ in 0..3 {
            let error = stub.get("/list").await.unwrap_err();
            assert!(matches!(error, ClientError::ExhaustedResponses(ref url) if url == "/list"));
        }
    }

    #[tokio::test]
    async fn instances_do_not_share_cursors() {
        let config = || {
            [(
                "/list".to_string(),
                StubResponse::from(vec![json!(1), json!(2)]),
            )]
        };
        let first = StubTransport::configured(config());
        let second = StubTransport::configured(config());

        assert_eq!(first.get("/list").await.unwrap(), json!(1));
        assert_eq!(first.get("/list").await.unwrap(), json!(2));

        // untouched by the first stub's consumption
        assert_eq!(second.get("/list").await.unwrap(), json!(1));
    }

    #[tokio::test]
    async fn post_resolves_by_url_alone() {
        let stub = StubTransport::configured([(
            "/endpoint".to_string(),
            StubResponse::from(json!({"ok": true})),
        )]);

        let headers = HashMap::from([("X-Ignored".to_string(), "yes".to_string())]);
        let body = json!({"also": "ignored"});

        assert_eq!(
            stub.post("/endpoint", &headers, &body).await.unwrap(),
            json!({"ok": true})
        );
    }

    #[tokio::test]
    async fn a_configured_json_array_scalar_is_not_a_sequence() {
        let stub = StubTransport::configured([(
            "/array".to_string(),
            StubResponse::from(json!(["X", "Y"])),
        )]);

        // The whole array comes back on every call.
        assert_eq!(stub.get("/array").await.unwrap(), json!(["X", "Y"]));
        assert_eq!(stub.get("/array").await.unwrap(), json!(["X", "Y"]));
    }

    #[tokio::test]
    async fn empty_stub_rejects_everything() {
        let stub = StubTransport::new();

        let error = stub.get("/anything").await.unwrap_err();
        assert_eq!(error.to_string(), "URL not configured: /anything");
    }
}
