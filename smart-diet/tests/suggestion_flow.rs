//! End-to-end walk of the read-path state machine against an in-memory
//! store and a scripted remote client, plus a shorter-TTL policy variant.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use smart_diet::{
    keys, CacheEntry, CachePolicy, ClientError, InMemoryStore, InsightsPeriod, KeyValueStore,
    SmartDietCache, SuggestionContext, SuggestionFeedback, SuggestionOptions, SuggestionRequest,
    SuggestionsClient,
};

/// Remote stand-in fed from a queue; records the requests it saw.
#[derive(Default)]
struct FlowClient {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    seen_requests: Mutex<Vec<(SuggestionContext, String)>>,
    calls: AtomicUsize,
}

impl FlowClient {
    fn scripted(responses: Vec<Result<Value, ClientError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        })
    }
}

#[async_trait]
impl SuggestionsClient for FlowClient {
    async fn fetch_suggestions(&self, request: &SuggestionRequest) -> Result<Value, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_requests
            .lock()
            .unwrap()
            .push((request.context, request.user_id.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ClientError::Transport("unscripted call".into())))
    }

    async fn fetch_insights(
        &self,
        _user_id: &str,
        _period: InsightsPeriod,
    ) -> Result<Value, ClientError> {
        Err(ClientError::Transport("unscripted call".into()))
    }

    async fn send_feedback(&self, _feedback: &SuggestionFeedback) -> Result<(), ClientError> {
        Ok(())
    }

    async fn apply_optimization(&self, _suggestion_id: &str) -> Result<Vec<Value>, ClientError> {
        Ok(Vec::new())
    }
}

fn response(tag: &str) -> Value {
    json!({
        "user_id": "user-1",
        "context_type": "today",
        "generated_at": "2026-08-30T08:00:00Z",
        "suggestions": [{"id": tag, "name": "overnight oats"}],
    })
}

/// Full lifecycle for one key: cold miss → fetch+cache → fresh hit →
/// expiry → failed refetch served stale → invalidation → cold error.
#[tokio::test]
async fn read_path_walks_the_state_machine() {
    // Tight TTL so the test controls expiry by rewriting timestamps.
    let mut ttls = HashMap::new();
    ttls.insert(SuggestionContext::Today, Duration::from_secs(60));
    let store = Arc::new(InMemoryStore::new());
    let client = FlowClient::scripted(vec![
        Ok(response("v1")),
        Err(ClientError::Transport("offline".into())),
        Err(ClientError::Transport("still offline".into())),
    ]);
    let cache = SmartDietCache::with_policy(
        store.clone(),
        client.clone(),
        CachePolicy::with_ttls(ttls),
    );
    let key = keys::suggestion_key(SuggestionContext::Today, "user-1");

    // Cold miss: FETCH_REMOTE -> WRITE_CACHE -> RETURN_FRESH.
    let first = cache
        .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    assert_eq!(first, response("v1"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        client.seen_requests.lock().unwrap()[0],
        (SuggestionContext::Today, "user-1".to_string())
    );

    // Fresh hit: RETURN_CACHED, remote untouched.
    let second = cache
        .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    // Backdate the entry past the 60s TTL to force expiry.
    let raw = store.get_item(&key).await.unwrap().unwrap();
    let mut entry = CacheEntry::decode(&raw).unwrap();
    entry.timestamp -= 2 * 60 * 1000;
    store.set_item(&key, &entry.encode().unwrap()).await.unwrap();

    // Expired + offline remote: CHECK_STALE_CACHE -> RETURN_STALE.
    let third = cache
        .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    assert_eq!(third, response("v1"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.cache_stats("user-1").await.stale_served, 1);

    // Invalidate, then a cold read against the offline remote must error:
    // CHECK_STALE_CACHE -> RAISE_ERROR.
    cache.invalidate_user("user-1").await;
    let err = cache
        .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("today"));
    assert!(err.to_string().contains("user-1"));
    assert_eq!(client.calls.load(Ordering::SeqCst), 3);
}

/// Contexts cache independently: one user's today/discover entries live
/// under separate keys with separate TTL behavior.
#[tokio::test]
async fn contexts_are_cached_independently() {
    let store = Arc::new(InMemoryStore::new());
    let client = FlowClient::scripted(vec![Ok(response("today")), Ok(response("discover"))]);
    let cache = SmartDietCache::new(store, client.clone());

    cache
        .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    cache
        .get_suggestions(SuggestionContext::Discover, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    assert_eq!(client.calls.load(Ordering::SeqCst), 2);

    // Both now fresh; neither re-fetches.
    cache
        .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    cache
        .get_suggestions(SuggestionContext::Discover, "user-1", SuggestionOptions::default())
        .await
        .unwrap();
    assert_eq!(client.calls.load(Ordering::SeqCst), 2);

    let stats = cache.cache_stats("user-1").await;
    assert!(stats.contexts[&SuggestionContext::Today].exists);
    assert!(stats.contexts[&SuggestionContext::Discover].exists);
    assert!(!stats.contexts[&SuggestionContext::Optimize].exists);
}
