//! Persistent key-value store capability.
//!
//! The cache sits on top of whatever device storage the host app provides;
//! this trait is that seam. Every method is async and may fail on the
//! underlying storage; the cache manager degrades those failures to cache
//! misses or no-op invalidations rather than surfacing them.

mod error;
mod in_memory;

pub use error::StoreError;
pub use in_memory::InMemoryStore;

use async_trait::async_trait;

/// Async string key-value storage.
///
/// Stored values are opaque strings; the cache layer keeps JSON envelopes
/// in them. Each call is one storage operation; the store is shared
/// process-wide state and is never held open across calls.
///
/// **Interaction**: injected into [`SmartDietCache`](crate::SmartDietCache)
/// at construction; tests substitute in-memory or failing fakes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value under `key`. Absent keys are not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every listed key in one bulk call. Absent keys are not an
    /// error.
    async fn multi_remove(&self, keys: &[String]) -> Result<(), StoreError>;

    /// Remove everything.
    async fn clear(&self) -> Result<(), StoreError>;
}
