//! # parley-common
//!
//! Shared value types for the parley HTTP client crates.
//!
//! This crate provides the two building blocks the client library and its
//! consumers both need:
//! - [`JsonRequest`], an immutable record of one outgoing HTTP call
//! - [`OutputListener`] / [`OutputTracker`], a generic append-only channel
//!   for observing side effects from tests
//!
//! ## Example
//!
//! ```
//! use parley_common::{JsonRequest, OutputListener};
//!
//! let listener = OutputListener::new();
//! let tracker = listener.create_tracker();
//!
//! listener.emit(JsonRequest::get("/status"));
//!
//! assert_eq!(tracker.output(), vec![JsonRequest::get("/status")]);
//! ```

/// HTTP request descriptor types.
///
/// Provides the immutable [`JsonRequest`] value recorded for every outgoing
/// call, plus the [`HttpMethod`] enum.
pub mod http;
/// Output tracking for observable side effects.
///
/// Provides the listener/tracker pair used to assert on emitted events
/// without mocking.
pub mod tracking;

pub use http::{HttpMethod, JsonRequest};
pub use tracking::{OutputListener, OutputTracker};
