//! Public facade for issuing JSON HTTP requests.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use parley_common::{JsonRequest, OutputListener, OutputTracker};

use crate::Transport;
use crate::error::ClientError;
use crate::live::LiveTransport;
use crate::stub::{StubResponse, StubTransport};

/// JSON HTTP client with a substitutable transport.
///
/// Exactly one transport is bound at construction: [`LiveTransport`] for
/// production, [`StubTransport`] for tests. The facade behaves identically
/// either way — it resolves URL templates, records one [`JsonRequest`]
/// descriptor per call, delegates to the transport, and converts the
/// response payload to the caller's requested type.
///
/// Cloning the client shares both the transport and the request log.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    transport: Arc<dyn Transport>,
    requests: Arc<OutputListener<JsonRequest>>,
}

impl JsonHttpClient {
    /// Creates a client bound to a [`LiveTransport`] with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(Arc::new(LiveTransport::new()))
    }

    /// Creates a client bound to the given transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            requests: Arc::new(OutputListener::new()),
        }
    }

    /// Creates a client bound to an empty [`StubTransport`].
    ///
    /// Every call fails with [`ClientError::UnconfiguredUrl`]: a useful
    /// default response cannot be guessed for an arbitrary endpoint, so
    /// none is provided.
    #[must_use]
    pub fn stubbed() -> Self {
        Self::with_transport(Arc::new(StubTransport::new()))
    }

    /// Creates a client bound to a [`StubTransport`] answering from the
    /// given URL-to-response mapping. Keys must be fully resolved URLs,
    /// query strings included.
    #[must_use]
    pub fn stubbed_with<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = (String, StubResponse)>,
    {
        Self::with_transport(Arc::new(StubTransport::configured(responses)))
    }

    /// Issues a GET request and deserializes the response into `T`.
    ///
    /// `{name}` placeholders in `url_template` are replaced left to right
    /// by `url_values` positionally; the placeholder names themselves are
    /// documentation only. The resolved URL is recorded in the request log
    /// before the transport is consulted, so failed calls are observable
    /// too.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::InvalidRequest`] if the template has more
    /// placeholders than values, with a transport error if the request
    /// cannot be satisfied, or with
    /// [`ClientError::ResponseTypeMismatch`] if the payload does not fit
    /// `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url_template: &str,
        url_values: &[&str],
    ) -> Result<T, ClientError> {
        let url = interpolate_url(url_template, url_values)?;
        self.requests.emit(JsonRequest::get(url.as_str()));

        let payload = self.transport.get(&url).await?;
        convert_payload(&url, payload)
    }

    /// Issues a POST request and deserializes the response into `T`.
    ///
    /// `url` is used as-is, with no interpolation. Headers and body are
    /// passed to the transport verbatim and captured in the request log.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::Serialization`] if the body cannot be
    /// serialized, with a transport error if the request cannot be
    /// satisfied, or with [`ClientError::ResponseTypeMismatch`] if the
    /// payload does not fit `T`.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = serde_json::to_value(body)?;
        self.requests
            .emit(JsonRequest::post(url, headers.clone(), body.clone()));

        let payload = self.transport.post(url, headers, &body).await?;
        convert_payload(url, payload)
    }

    /// Returns a view over every request issued through this client, in
    /// call order, whether or not the call succeeded.
    #[must_use]
    pub fn track_requests(&self) -> OutputTracker<JsonRequest> {
        self.requests.create_tracker()
    }
}

impl Default for JsonHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces `{name}` placeholders left to right with `values` positionally.
///
/// The same resolved string is used for request tracking and for stub
/// configuration lookup, so the two always agree byte for byte. Surplus
/// values are ignored; surplus placeholders are an error.
fn interpolate_url(template: &str, values: &[&str]) -> Result<String, ClientError> {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;
    let mut values = values.iter();

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            return Err(ClientError::InvalidRequest(format!(
                "unterminated placeholder in URL template: {template}"
            )));
        };
        let Some(value) = values.next() else {
            return Err(ClientError::InvalidRequest(format!(
                "not enough values for URL template: {template}"
            )));
        };
        url.push_str(&rest[..open]);
        url.push_str(value);
        rest = &rest[open + close + 1..];
    }
    url.push_str(rest);

    Ok(url)
}

/// Converts a transport payload into the caller's requested type.
///
/// Both transports hand back raw JSON, so a shape mismatch fails here the
/// same way regardless of which transport produced the payload.
fn convert_payload<T: DeserializeOwned>(url: &str, payload: Value) -> Result<T, ClientError> {
    let actual = json_type_name(&payload);
    serde_json::from_value(payload).map_err(|_| ClientError::ResponseTypeMismatch {
        url: url.to_string(),
        actual: actual.to_string(),
        expected: std::any::type_name::<T>().to_string(),
    })
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
