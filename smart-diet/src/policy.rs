//! Cache policy engine: per-context TTL table and freshness checks.
//!
//! Pure functions over (context, stored-at, now). The manager decides what
//! to do with the answer; this module only answers "what TTL applies?" and
//! "is this entry still fresh?".

use std::collections::HashMap;
use std::time::Duration;

use crate::context::SuggestionContext;

/// TTL applied when a custom table has no entry for a context.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Static mapping from suggestion context to allowed staleness.
///
/// The default table encodes how time-sensitive each context is: "today"
/// suggestions go stale within the meal they were generated for, while
/// exploratory "discover" content stays useful for hours.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    ttls: HashMap<SuggestionContext, Duration>,
}

impl CachePolicy {
    /// Policy with the documented per-context TTLs.
    pub fn new() -> Self {
        let mut ttls = HashMap::new();
        ttls.insert(SuggestionContext::Today, Duration::from_secs(30 * 60));
        ttls.insert(SuggestionContext::Optimize, Duration::from_secs(45 * 60));
        ttls.insert(SuggestionContext::Discover, Duration::from_secs(2 * 60 * 60));
        ttls.insert(SuggestionContext::Insights, Duration::from_secs(60 * 60));
        Self { ttls }
    }

    /// Policy with a caller-supplied TTL table. Contexts missing from the
    /// table fall back to [`DEFAULT_TTL`].
    pub fn with_ttls(ttls: HashMap<SuggestionContext, Duration>) -> Self {
        Self { ttls }
    }

    /// TTL for a context. Never fails; unlisted contexts get [`DEFAULT_TTL`].
    pub fn ttl_for(&self, context: SuggestionContext) -> Duration {
        self.ttls.get(&context).copied().unwrap_or(DEFAULT_TTL)
    }

    /// Whether an entry written at `stored_at_ms` is still fresh at `now_ms`.
    ///
    /// Freshness is strictly `age < ttl`: an entry exactly `ttl` old is
    /// expired. A clock reading earlier than the write time (skew) clamps
    /// the age to zero, so skewed entries count as fresh rather than
    /// erroring.
    pub fn is_fresh(&self, stored_at_ms: i64, context: SuggestionContext, now_ms: i64) -> bool {
        let age_ms = (now_ms - stored_at_ms).max(0) as u128;
        age_ms < self.ttl_for(context).as_millis()
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60 * 1000;

    /// **Scenario**: freshness holds strictly below the TTL and flips at the
    /// exact boundary.
    #[test]
    fn freshness_boundary_is_strictly_less_than() {
        let policy = CachePolicy::new();
        for context in SuggestionContext::ALL {
            let ttl_ms = policy.ttl_for(context).as_millis() as i64;
            assert!(policy.is_fresh(0, context, ttl_ms - 1));
            assert!(!policy.is_fresh(0, context, ttl_ms));
            assert!(!policy.is_fresh(0, context, ttl_ms + 1));
        }
    }

    /// **Scenario**: the same age is expired for "today" but fresh for
    /// "discover" under the documented table.
    #[test]
    fn ttl_differs_per_context() {
        let policy = CachePolicy::new();
        let stored_at = 0;
        let now = 45 * MIN;
        assert!(!policy.is_fresh(stored_at, SuggestionContext::Today, now));
        assert!(policy.is_fresh(stored_at, SuggestionContext::Discover, now));
    }

    /// **Scenario**: a write timestamp in the future (clock skew) is treated
    /// as a zero-age fresh entry, not an error or an expiry.
    #[test]
    fn clock_skew_clamps_to_fresh() {
        let policy = CachePolicy::new();
        let now = 1_000_000;
        let stored_in_future = now + 5 * MIN;
        for context in SuggestionContext::ALL {
            assert!(policy.is_fresh(stored_in_future, context, now));
        }
    }

    #[test]
    fn custom_table_falls_back_to_default_ttl() {
        let mut ttls = HashMap::new();
        ttls.insert(SuggestionContext::Today, Duration::from_secs(60));
        let policy = CachePolicy::with_ttls(ttls);
        assert_eq!(policy.ttl_for(SuggestionContext::Today), Duration::from_secs(60));
        assert_eq!(policy.ttl_for(SuggestionContext::Discover), DEFAULT_TTL);
    }
}
