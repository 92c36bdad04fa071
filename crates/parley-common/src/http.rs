//! Immutable descriptors for outgoing HTTP requests.
//!
//! A [`JsonRequest`] is constructed once per call by the client facade,
//! published to its request listener, and never mutated afterwards. Tests
//! compare descriptors by value, so equality is deep: method, URL, headers,
//! and body must all match.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method of an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET. Carries no body.
    Get,
    /// HTTP POST. Carries a JSON body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Record of one outgoing JSON HTTP request.
///
/// The URL is the fully resolved form, after any template interpolation.
/// Header insertion order does not affect equality; names are compared as
/// case-sensitive strings. The body is an opaque JSON value compared
/// structurally, and is always `None` for GET requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRequest {
    /// Method used for the request.
    pub method: HttpMethod,
    /// Fully resolved request URL, including any query string.
    pub url: String,
    /// Headers passed through verbatim.
    pub headers: HashMap<String, String>,
    /// JSON body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl JsonRequest {
    /// Creates a GET descriptor with empty headers and no body.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Creates a POST descriptor with the given headers and body.
    #[must_use]
    pub fn post(url: impl Into<String>, headers: HashMap<String, String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers,
            body: Some(body),
        }
    }
}

impl fmt::Display for JsonRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
