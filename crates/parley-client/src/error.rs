//! Error types for the client library.

use serde::Deserialize;
use thiserror::Error;

/// Error response body from a JSON API.
///
/// Many providers wrap failures in a `{"error": {"message": ...}}` object;
/// the live transport uses this to surface the provider's own message.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// The error detail object from the API.
    pub error: ErrorDetail,
}

/// Detailed error information from the API.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    /// The error message text describing what went wrong.
    pub message: String,
}

/// Errors that can occur when issuing JSON HTTP requests.
///
/// The stub transport raises three distinct failures — unconfigured URL,
/// exhausted response sequence, and response type mismatch — mirroring the
/// production failure modes of a missing endpoint, an empty stream, and a
/// schema mismatch. None of them fall back to a default response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Network or HTTP request failure.
    ///
    /// DNS resolution, connection failures, socket errors. Propagated from
    /// the live transport unmodified; there is no retry.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Non-success HTTP status from the server.
    ///
    /// `message` is the provider's structured error message when the body
    /// carries one, otherwise the raw body text.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Status code returned by the server.
        status: reqwest::StatusCode,
        /// Best available description of the failure.
        message: String,
    },

    /// Malformed request, such as a URL template with too few values.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Structurally valid response that is semantically unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The stub transport has no configuration entry for the URL.
    #[error("URL not configured: {0}")]
    UnconfiguredUrl(String),

    /// The finite response sequence configured for the URL has run dry.
    ///
    /// An exhausted sequence stays exhausted; it never wraps around or
    /// reverts to unconfigured.
    #[error("No more responses configured for URL: {0}")]
    ExhaustedResponses(String),

    /// The response payload does not fit the caller's requested type.
    #[error("URL {url} returned a JSON {actual} which does not deserialize into {expected}")]
    ResponseTypeMismatch {
        /// Fully resolved URL of the request.
        url: String,
        /// JSON type actually present in the response payload.
        actual: String,
        /// Rust type the caller asked for.
        expected: String,
    },
}

impl ClientError {
    /// Whether this failure came from the stub's resolution policy rather
    /// than from a transport attempt.
    #[must_use]
    pub const fn is_stub_configuration_failure(&self) -> bool {
        matches!(self, Self::UnconfiguredUrl(_) | Self::ExhaustedResponses(_))
    }

    /// Whether this is a response type mismatch.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::ResponseTypeMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_url_message_names_the_url() {
        let error = ClientError::UnconfiguredUrl("/unconfigured".to_string());
        assert_eq!(error.to_string(), "URL not configured: /unconfigured");
    }

    #[test]
    fn exhausted_responses_message_names_the_url() {
        let error = ClientError::ExhaustedResponses("/list-of-one?a=b".to_string());
        assert_eq!(
            error.to_string(),
            "No more responses configured for URL: /list-of-one?a=b"
        );
    }

    #[test]
    fn type_mismatch_message_names_both_types() {
        let error = ClientError::ResponseTypeMismatch {
            url: "/endpoint".to_string(),
            actual: "string".to_string(),
            expected: "ExampleResponse".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("/endpoint"));
        assert!(message.contains("string"));
        assert!(message.contains("ExampleResponse"));
    }

    #[test]
    fn stub_failures_are_distinguishable() {
        assert!(ClientError::UnconfiguredUrl(String::new()).is_stub_configuration_failure());
        assert!(ClientError::ExhaustedResponses(String::new()).is_stub_configuration_failure());
        assert!(!ClientError::InvalidRequest(String::new()).is_stub_configuration_failure());
    }
}
