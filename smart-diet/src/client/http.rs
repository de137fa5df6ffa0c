//! Reqwest-backed suggestions client.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ClientError, SuggestionFeedback, SuggestionRequest, SuggestionsClient};
use crate::context::InsightsPeriod;

/// [`SuggestionsClient`] over HTTP via reqwest.
///
/// Holds only a base URL and a reqwest client; timeout policy belongs to
/// the supplied `reqwest::Client`.
pub struct HttpSuggestionsClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSuggestionsClient {
    /// Create with a base URL (e.g. `https://api.example.com`) and a
    /// default reqwest client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create with a caller-configured reqwest client (timeouts, proxies).
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SuggestionsClient for HttpSuggestionsClient {
    async fn fetch_suggestions(&self, request: &SuggestionRequest) -> Result<Value, ClientError> {
        let payload = self
            .http
            .get(self.url("/smart-diet/suggestions"))
            .query(&request.query_pairs())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(payload)
    }

    async fn fetch_insights(
        &self,
        user_id: &str,
        period: InsightsPeriod,
    ) -> Result<Value, ClientError> {
        let payload = self
            .http
            .get(self.url("/smart-diet/insights"))
            .query(&[("user_id", user_id), ("period", period.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(payload)
    }

    async fn send_feedback(&self, feedback: &SuggestionFeedback) -> Result<(), ClientError> {
        self.http
            .post(self.url("/smart-diet/feedback"))
            .json(feedback)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn apply_optimization(&self, suggestion_id: &str) -> Result<Vec<Value>, ClientError> {
        let body = self
            .http
            .post(self.url("/smart-diet/apply-optimization"))
            .json(&json!({ "suggestion_id": suggestion_id }))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        // `optimizations` may be missing entirely; treat that as empty.
        let optimizations = body
            .get("optimizations")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(optimizations)
    }
}
