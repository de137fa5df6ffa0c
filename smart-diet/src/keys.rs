//! Cache key construction.
//!
//! Keys are built by pure functions from structured input so the layout
//! lives in one place. Collision-freedom rests on two rules: the segment
//! after the shared prefix comes from a fixed alphabet (context names plus
//! the `insight_period` marker, none a prefix of another), and the
//! free-form user id is always the last segment. Equal key strings
//! therefore imply equal kinds, equal fixed segments, and then equal user
//! ids — even for user ids containing underscores.

use crate::context::{InsightsPeriod, SuggestionContext};

/// Prefix shared by every key this crate owns. Bulk invalidation relies on
/// the store being partitioned by this prefix plus the user segment.
pub const KEY_PREFIX: &str = "smart_diet";

/// Key for the cached suggestion payload of one (context, user) pair.
pub fn suggestion_key(context: SuggestionContext, user_id: &str) -> String {
    format!("{}_{}_{}", KEY_PREFIX, context.as_str(), user_id)
}

/// Key for the auxiliary per-period insights cache of one user.
///
/// The fixed `insight_period_<period>` segment precedes the user id so no
/// choice of user id can make this alias a suggestion key: `insight_` is
/// not a context name and `insights` never continues with `_period` in a
/// suggestion key's fixed position.
pub fn insights_key(user_id: &str, period: InsightsPeriod) -> String {
    format!("{}_insight_period_{}_{}", KEY_PREFIX, period.as_str(), user_id)
}

/// Every key bulk invalidation must remove for one user: one per known
/// context plus one per known insights period.
pub fn user_keys(user_id: &str) -> Vec<String> {
    let mut keys: Vec<String> = SuggestionContext::ALL
        .iter()
        .map(|context| suggestion_key(*context, user_id))
        .collect();
    keys.extend(
        InsightsPeriod::ALL
            .iter()
            .map(|period| insights_key(user_id, *period)),
    );
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_is_deterministic() {
        let a = suggestion_key(SuggestionContext::Today, "user-1");
        let b = suggestion_key(SuggestionContext::Today, "user-1");
        assert_eq!(a, b);
        assert_eq!(a, "smart_diet_today_user-1");
    }

    /// **Scenario**: across the full context alphabet, every insights
    /// period, and user ids chosen to probe underscore ambiguity, no two
    /// distinct keys collide.
    #[test]
    fn distinct_pairs_never_collide() {
        let users = [
            "alice",
            "bob",
            "alice_2",
            "today",
            "discover_x",
            "bob_week",
            "week_bob",
            "period_week_bob",
        ];
        let mut seen = HashSet::new();
        for context in SuggestionContext::ALL {
            for user in users {
                assert!(
                    seen.insert(suggestion_key(context, user)),
                    "collision for ({context}, {user})"
                );
            }
        }
        for period in InsightsPeriod::ALL {
            for user in users {
                assert!(
                    seen.insert(insights_key(user, period)),
                    "collision for insights ({user}, {period})"
                );
            }
        }
    }

    /// **Scenario**: an underscored user id cannot make one user's insights
    /// key alias another user's Insights-context suggestion key, so bulk
    /// invalidation stays per-user.
    #[test]
    fn insights_key_never_aliases_a_suggestion_key() {
        assert_ne!(
            insights_key("bob", InsightsPeriod::Week),
            suggestion_key(SuggestionContext::Insights, "bob_week")
        );
        let bob: HashSet<_> = user_keys("bob").into_iter().collect();
        let bob_week: HashSet<_> = user_keys("bob_week").into_iter().collect();
        assert!(bob.is_disjoint(&bob_week));
    }

    #[test]
    fn user_keys_cover_contexts_and_periods() {
        let keys = user_keys("u1");
        assert_eq!(
            keys.len(),
            SuggestionContext::ALL.len() + InsightsPeriod::ALL.len()
        );
        assert!(keys.contains(&"smart_diet_today_u1".to_string()));
        assert!(keys.contains(&"smart_diet_insight_period_week_u1".to_string()));
        // All keys carry the shared prefix so they stay in this crate's
        // partition of the store.
        assert!(keys.iter().all(|k| k.starts_with(KEY_PREFIX)));
    }

    #[test]
    fn user_keys_are_per_user() {
        let a: HashSet<_> = user_keys("alice").into_iter().collect();
        let b: HashSet<_> = user_keys("bob").into_iter().collect();
        assert!(a.is_disjoint(&b));
    }
}
