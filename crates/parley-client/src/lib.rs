//! # parley-client
//!
//! A JSON HTTP client with a substitutable transport.
//!
//! Production code and test code issue requests through the same
//! [`JsonHttpClient`] facade. In production the facade is bound to a
//! [`LiveTransport`] that performs real network I/O; in tests it is bound
//! to a [`StubTransport`] that answers from pre-configured responses and
//! performs no I/O at all. Callers cannot tell the two apart except by
//! the content of responses and failures.
//!
//! Every call additionally records an immutable
//! [`JsonRequest`](parley_common::JsonRequest) descriptor that tests can
//! read back through [`JsonHttpClient::track_requests`] — no mocking
//! framework required.
//!
//! ## Example
//!
//! ```
//! use parley_client::{JsonHttpClient, StubResponse};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), parley_client::ClientError> {
//! let client = JsonHttpClient::stubbed_with([(
//!     "/users/42".to_string(),
//!     StubResponse::from(json!({"name": "Ada"})),
//! )]);
//! let requests = client.track_requests();
//!
//! let user: serde_json::Value = client.get("/users/{id}", &["42"]).await?;
//!
//! assert_eq!(user["name"], "Ada");
//! assert_eq!(requests.output()[0].url, "/users/42");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

pub mod client;
pub mod error;
pub mod live;
pub mod openai;
pub mod stub;

pub use client::JsonHttpClient;
pub use error::ClientError;
pub use live::LiveTransport;
pub use openai::OpenAiClient;
pub use stub::{StubResponse, StubTransport};

/// Contract for performing or simulating one HTTP exchange.
///
/// Implementations receive fully resolved URLs; any template interpolation
/// has already happened in the facade. They return the response payload as
/// raw JSON — conversion to the caller's requested type is the facade's job,
/// so both transports fail a shape mismatch the same way.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET against `url` and returns the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request cannot be satisfied.
    async fn get(&self, url: &str) -> Result<Value, ClientError>;

    /// Performs a POST against `url` with the given headers and JSON body.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request cannot be satisfied.
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &Value,
    ) -> Result<Value, ClientError>;
}

impl std::fmt::Debug for dyn Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Transport")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    // Transport that always answers with the same payload, to prove the
    // facade works against any implementation of the trait.
    struct FixedTransport {
        payload: Value,
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get(&self, _url: &str) -> Result<Value, ClientError> {
            Ok(self.payload.clone())
        }

        async fn post(
            &self,
            _url: &str,
            _headers: &HashMap<String, String>,
            _body: &Value,
        ) -> Result<Value, ClientError> {
            Ok(self.payload.clone())
        }
    }

    #[tokio::test]
    async fn facade_accepts_any_transport_implementation() {
        let transport = Arc::new(FixedTransport {
            payload: json!({"answer": 42}),
        });
        let client = JsonHttpClient::with_transport(transport);

        let from_get: Value = client.get("/anything", &[]).await.unwrap();
        let from_post: Value = client
            .post("/anything", &HashMap::new(), &json!({}))
            .await
            .unwrap();

        assert_eq!(from_get, json!({"answer": 42}));
        assert_eq!(from_post, json!({"answer": 42}));
    }
}
