//! Suggestion cache manager and stale fallback.
//!
//! [`SmartDietCache`] owns the read/write lifecycle of cached suggestion
//! entries: check cache, serve or fetch, store, and invalidate on mutating
//! actions. Per read call it walks a fixed path:
//!
//! ```text
//! START -> CHECK_FRESH_CACHE
//! CHECK_FRESH_CACHE -- fresh hit --> RETURN_CACHED
//! CHECK_FRESH_CACHE -- miss/stale --> FETCH_REMOTE
//! FETCH_REMOTE -- success --> WRITE_CACHE -> RETURN_FRESH
//! FETCH_REMOTE -- failure --> CHECK_STALE_CACHE
//! CHECK_STALE_CACHE -- stale hit --> RETURN_STALE
//! CHECK_STALE_CACHE -- no entry --> RAISE_ERROR
//! ```
//!
//! Storage failures degrade to cache misses or no-op invalidations; only a
//! remote failure with nothing cached at all reaches the caller as an
//! error. Overlapping cold reads for one key may both fetch and both
//! write; last write wins with an equally valid payload, so there is no
//! single-flight dedup.

mod stats;

pub use stats::{CacheStats, ContextStats};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::client::{SuggestionFeedback, SuggestionOptions, SuggestionRequest, SuggestionsClient};
use crate::context::{InsightsPeriod, SuggestionContext};
use crate::entry::CacheEntry;
use crate::error::SmartDietError;
use crate::keys;
use crate::policy::CachePolicy;
use crate::store::KeyValueStore;

/// Outcome of a cache lookup. Keeps the recovered-vs-usable distinction in
/// the type instead of in log statements: corrupt entries and store read
/// failures have already been folded into `Miss` by the time a caller sees
/// this.
#[derive(Debug)]
enum Lookup {
    /// Entry exists and is within its context TTL.
    Fresh(Value),
    /// Entry exists but is past its TTL; the fallback path re-reads it
    /// only if the remote fetch fails.
    Stale,
    /// No usable entry.
    Miss,
}

/// Per-user, per-context suggestion cache in front of the Smart Diet API.
///
/// Construct once at startup with the store and client injected, then pass
/// down by reference or `Arc`; there is no global instance.
///
/// # Example
///
/// ```rust,ignore
/// use smart_diet::{HttpSuggestionsClient, InMemoryStore, SmartDietCache, SuggestionContext};
///
/// let cache = SmartDietCache::new(
///     Arc::new(InMemoryStore::new()),
///     Arc::new(HttpSuggestionsClient::new("https://api.example.com")),
/// );
/// let payload = cache
///     .get_suggestions(SuggestionContext::Today, "user-1", Default::default())
///     .await?;
/// ```
pub struct SmartDietCache {
    store: Arc<dyn KeyValueStore>,
    client: Arc<dyn SuggestionsClient>,
    policy: CachePolicy,
    stale_served: AtomicU64,
}

impl SmartDietCache {
    /// Create with the documented TTL policy.
    pub fn new(store: Arc<dyn KeyValueStore>, client: Arc<dyn SuggestionsClient>) -> Self {
        Self::with_policy(store, client, CachePolicy::new())
    }

    /// Create with a caller-supplied TTL policy.
    pub fn with_policy(
        store: Arc<dyn KeyValueStore>,
        client: Arc<dyn SuggestionsClient>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store,
            client,
            policy,
            stale_served: AtomicU64::new(0),
        }
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Read and decode the entry under `key`. Store failures and corrupt
    /// values both come back as `None`; neither reaches the caller.
    async fn read_entry(&self, key: &str) -> Option<CacheEntry> {
        let raw = match self.store.get_item(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::debug!(key, %err, "cache read failed, treating as miss");
                return None;
            }
        };
        match CacheEntry::decode(&raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(key, %err, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    async fn lookup(&self, key: &str, context: SuggestionContext, now_ms: i64) -> Lookup {
        match self.read_entry(key).await {
            Some(entry) if self.policy.is_fresh(entry.timestamp, context, now_ms) => {
                Lookup::Fresh(entry.data)
            }
            Some(_) => Lookup::Stale,
            None => Lookup::Miss,
        }
    }

    /// Persist a freshly fetched payload. Timestamp is the write-time
    /// clock, never the read-path's earlier `now`. Failure is logged and
    /// swallowed: the caller still gets the fetched payload.
    async fn write_back(&self, key: &str, payload: &Value) {
        let entry = CacheEntry::new(payload.clone(), Self::now_ms());
        let raw = match entry.encode() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key, %err, "cache entry encode failed, skipping write-back");
                return;
            }
        };
        if let Err(err) = self.store.set_item(key, &raw).await {
            tracing::warn!(key, %err, "cache write-back failed, serving uncached response");
        }
    }

    /// Fallback read: any entry under `key`, freshness ignored. Only used
    /// after a remote fetch has already failed.
    async fn stale_fallback(&self, key: &str) -> Option<Value> {
        let entry = self.read_entry(key).await?;
        self.stale_served.fetch_add(1, Ordering::Relaxed);
        Some(entry.data)
    }

    /// Suggestions for one (context, user), served from cache when fresh.
    ///
    /// Fresh hits perform no network I/O. On a miss or stale entry the
    /// remote client is called; success is written back and returned, and
    /// failure falls back to the most recent cached value regardless of
    /// freshness. Only when nothing is cached at all does the remote error
    /// surface, as [`SmartDietError::SuggestionsUnavailable`].
    pub async fn get_suggestions(
        &self,
        context: SuggestionContext,
        user_id: &str,
        options: SuggestionOptions,
    ) -> Result<Value, SmartDietError> {
        let key = keys::suggestion_key(context, user_id);
        if let Lookup::Fresh(payload) = self.lookup(&key, context, Self::now_ms()).await {
            return Ok(payload);
        }

        let request = SuggestionRequest::new(context, user_id).with_options(options);
        match self.client.fetch_suggestions(&request).await {
            Ok(payload) => {
                self.write_back(&key, &payload).await;
                Ok(payload)
            }
            Err(err) => match self.stale_fallback(&key).await {
                Some(payload) => {
                    tracing::warn!(%context, user_id, %err, "remote fetch failed, serving stale cache");
                    Ok(payload)
                }
                None => Err(SmartDietError::SuggestionsUnavailable {
                    context,
                    user: user_id.to_string(),
                    source: err,
                }),
            },
        }
    }

    /// Diet insights for one (user, period), cached under an auxiliary
    /// per-period key with the insights TTL. Same corruption and stale
    /// fallback handling as [`get_suggestions`](Self::get_suggestions).
    pub async fn get_insights(
        &self,
        user_id: &str,
        period: InsightsPeriod,
    ) -> Result<Value, SmartDietError> {
        let key = keys::insights_key(user_id, period);
        if let Lookup::Fresh(payload) = self
            .lookup(&key, SuggestionContext::Insights, Self::now_ms())
            .await
        {
            return Ok(payload);
        }

        match self.client.fetch_insights(user_id, period).await {
            Ok(payload) => {
                self.write_back(&key, &payload).await;
                Ok(payload)
            }
            Err(err) => match self.stale_fallback(&key).await {
                Some(payload) => {
                    tracing::warn!(user_id, %period, %err, "remote insights failed, serving stale cache");
                    Ok(payload)
                }
                None => Err(SmartDietError::InsightsUnavailable {
                    user: user_id.to_string(),
                    period,
                    source: err,
                }),
            },
        }
    }

    /// Submit feedback for a suggestion, then drop the user's cached
    /// suggestions: feedback changes what the server would suggest next.
    pub async fn submit_feedback(
        &self,
        feedback: &SuggestionFeedback,
    ) -> Result<(), SmartDietError> {
        self.client.send_feedback(feedback).await?;
        self.invalidate_user(&feedback.user_id).await;
        Ok(())
    }

    /// Apply a plan optimization, then drop the user's cached suggestions.
    /// Returns the server's optimization list, empty when it sent none.
    pub async fn optimize_meal_plan(
        &self,
        user_id: &str,
        suggestion_id: &str,
    ) -> Result<Vec<Value>, SmartDietError> {
        let optimizations = self.client.apply_optimization(suggestion_id).await?;
        self.invalidate_user(user_id).await;
        Ok(optimizations)
    }

    /// Remove every cached entry for `user_id` in one bulk call: all
    /// context keys plus the per-period insights keys. Best-effort; storage
    /// errors are swallowed and absent keys are fine.
    pub async fn invalidate_user(&self, user_id: &str) {
        let user_keys = keys::user_keys(user_id);
        if let Err(err) = self.store.multi_remove(&user_keys).await {
            tracing::debug!(user_id, %err, "cache invalidation failed, ignoring");
        }
    }

    /// Per-context cache state for `user_id`, computed by raw reads; never
    /// triggers a fetch. A failed or corrupt read for one context reports
    /// that context as absent without aborting the rest.
    pub async fn cache_stats(&self, user_id: &str) -> CacheStats {
        let now_ms = Self::now_ms();
        let mut contexts = HashMap::new();
        for context in SuggestionContext::ALL {
            let key = keys::suggestion_key(context, user_id);
            let stats = match self.read_entry(&key).await {
                Some(entry) => ContextStats {
                    exists: true,
                    expired: !self.policy.is_fresh(entry.timestamp, context, now_ms),
                    age_ms: Some(entry.age_ms(now_ms)),
                },
                None => ContextStats::absent(),
            };
            contexts.insert(context, stats);
        }
        CacheStats {
            contexts,
            stale_served: self.stale_served.load(Ordering::Relaxed),
        }
    }
}
