//! Public boundary errors.
//!
//! Recoverable conditions (corrupt stored entries, store read/write
//! failures, stale fallback) never reach this type; only a remote failure
//! with no cached data to fall back on, or a failed mutating call, does.

use thiserror::Error;

use crate::client::ClientError;
use crate::context::{InsightsPeriod, SuggestionContext};

/// Errors surfaced to callers of [`SmartDietCache`](crate::SmartDietCache).
///
/// `SuggestionsUnavailable` is distinct from a successful response with an
/// empty suggestion list: callers can render the former as a retryable
/// error state and the latter as "no suggestions".
#[derive(Debug, Error)]
pub enum SmartDietError {
    /// Remote fetch failed and no cached entry, fresh or stale, exists for
    /// this (context, user).
    #[error("no cached or remote suggestions for context '{context}' (user {user}): {source}")]
    SuggestionsUnavailable {
        context: SuggestionContext,
        user: String,
        #[source]
        source: ClientError,
    },

    /// Remote fetch failed and no cached insights exist for this
    /// (user, period).
    #[error("no cached or remote insights for user {user} (period {period}): {source}")]
    InsightsUnavailable {
        user: String,
        period: InsightsPeriod,
        #[source]
        source: ClientError,
    },

    /// A mutating call (feedback, optimization) failed at the remote end.
    #[error("remote call failed: {0}")]
    Remote(#[from] ClientError),
}
