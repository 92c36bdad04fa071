//! Transport performing real network I/O.

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

use crate::Transport;
use crate::error::{ClientError, ErrorResponse};

/// Transport backed by a [`reqwest::Client`].
///
/// Forwards requests as-is and returns whatever the server answers; it
/// records nothing and never retries. Timeout policy belongs to the
/// supplied `reqwest::Client`, not to this type.
#[derive(Debug, Clone, Default)]
pub struct LiveTransport {
    client: reqwest::Client,
}

impl LiveTransport {
    /// Creates a transport with a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport using a caller-configured `reqwest` client,
    /// for timeouts, proxies, and similar concerns.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_json(url: &str, response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.map_err(|e| {
                warn!("failed to read error response body from {url}: {e}");
                ClientError::Network(e)
            })?;

            // Prefer the provider's structured message over the raw body.
            let message = match serde_json::from_str::<ErrorResponse>(&error_text) {
                Ok(parsed) => parsed.error.message,
                Err(_) => error_text,
            };

            return Err(ClientError::HttpStatus { status, message });
        }

        let body = response.text().await?;
        debug!("response from {url}: {body}");

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for LiveTransport {
    async fn get(&self, url: &str) -> Result<Value, ClientError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        Self::read_json(url, response).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &Value,
    ) -> Result<Value, ClientError> {
        debug!("POST {url}");
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.json(body).send().await?;
        Self::read_json(url, response).await
    }
}
