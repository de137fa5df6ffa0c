//! Remote Smart Diet suggestions client capability.
//!
//! The cache layer talks to the suggestions API only through
//! [`SuggestionsClient`], so tests can script responses and failures without
//! a server. [`HttpSuggestionsClient`] is the reqwest-backed implementation.
//!
//! Responses are carried as opaque [`serde_json::Value`]s: the API is
//! permissive by design and this crate does not validate response schemas.

mod http;
mod request;

pub use http::HttpSuggestionsClient;
pub use request::{SuggestionFeedback, SuggestionOptions, SuggestionRequest};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::context::InsightsPeriod;

/// Errors from the remote suggestions API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (DNS, connect, timeout, offline).
    #[error("transport: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16 },
    /// The response body was not valid JSON.
    #[error("decode: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Issues Smart Diet API requests. Abstraction for testing and for the
/// cache manager's single remote seam.
///
/// The client owns no caching behavior; timeouts are whatever the
/// underlying HTTP client enforces.
#[async_trait]
pub trait SuggestionsClient: Send + Sync {
    /// `GET /smart-diet/suggestions` with the request's query mapping.
    async fn fetch_suggestions(&self, request: &SuggestionRequest) -> Result<Value, ClientError>;

    /// `GET /smart-diet/insights?user_id=&period=`.
    async fn fetch_insights(
        &self,
        user_id: &str,
        period: InsightsPeriod,
    ) -> Result<Value, ClientError>;

    /// `POST /smart-diet/feedback` with the feedback record.
    async fn send_feedback(&self, feedback: &SuggestionFeedback) -> Result<(), ClientError>;

    /// `POST /smart-diet/apply-optimization` with `{suggestion_id}`.
    /// Returns the `optimizations` array, or empty when absent.
    async fn apply_optimization(&self, suggestion_id: &str) -> Result<Vec<Value>, ClientError>;
}
