//! # Smart Diet suggestion cache
//!
//! A client-side, per-user, per-context cache in front of the Smart Diet
//! suggestions API. Sits between screen-level consumers and the remote
//! endpoint with a **check cache → serve or fetch → store** read path.
//!
//! ## Design principles
//!
//! - **Variable TTL per context**: "today" suggestions expire in minutes,
//!   exploratory "discover" content tolerates hours ([`CachePolicy`]).
//! - **Availability over freshness**: when the remote API is unreachable,
//!   the most recent cached value is served regardless of age; only a cold
//!   key with no fallback surfaces an error ([`SmartDietError`]).
//! - **Storage failures never crash reads**: corrupt entries are misses,
//!   write-back failures are logged, invalidation is best-effort.
//! - **Explicit composition**: [`SmartDietCache`] is constructed once with
//!   its store and client injected; there is no global instance and tests
//!   substitute fakes through the [`KeyValueStore`] and
//!   [`SuggestionsClient`] traits.
//!
//! ## Main modules
//!
//! - [`cache`]: [`SmartDietCache`], [`CacheStats`] — the read/write
//!   orchestration and stale fallback.
//! - [`policy`]: [`CachePolicy`] — the TTL table and freshness checks.
//! - [`store`]: [`KeyValueStore`] trait, [`InMemoryStore`], [`StoreError`].
//! - [`client`]: [`SuggestionsClient`] trait, [`HttpSuggestionsClient`],
//!   request/feedback types, [`ClientError`].
//! - [`keys`]: cache-key construction.
//! - [`context`]: [`SuggestionContext`], [`InsightsPeriod`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use smart_diet::{
//!     HttpSuggestionsClient, InMemoryStore, SmartDietCache, SuggestionContext,
//!     SuggestionOptions,
//! };
//!
//! # async fn example() -> Result<(), smart_diet::SmartDietError> {
//! let cache = SmartDietCache::new(
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(HttpSuggestionsClient::new("https://api.example.com")),
//! );
//!
//! let payload = cache
//!     .get_suggestions(SuggestionContext::Today, "user-1", SuggestionOptions::default())
//!     .await?;
//! println!("{payload}");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod context;
pub mod entry;
pub mod error;
pub mod keys;
pub mod policy;
pub mod store;

pub use cache::{CacheStats, ContextStats, SmartDietCache};
pub use client::{
    ClientError, HttpSuggestionsClient, SuggestionFeedback, SuggestionOptions, SuggestionRequest,
    SuggestionsClient,
};
pub use context::{InsightsPeriod, SuggestionContext};
pub use entry::CacheEntry;
pub use error::SmartDietError;
pub use policy::{CachePolicy, DEFAULT_TTL};
pub use store::{InMemoryStore, KeyValueStore, StoreError};
