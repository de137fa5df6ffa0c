//! Cache statistics types.
//!
//! Derived on demand by reading the store; never cached themselves.

use std::collections::HashMap;

use serde::Serialize;

use crate::context::SuggestionContext;

/// State of one context's cached entry for one user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextStats {
    /// Whether a readable, well-formed entry exists. Read failures and
    /// corrupt entries report `false`.
    pub exists: bool,
    /// Whether the entry is past its context TTL. Always `false` when
    /// `exists` is `false`.
    pub expired: bool,
    /// Entry age in milliseconds (clock skew clamps to zero), or `None`
    /// when no entry exists.
    pub age_ms: Option<i64>,
}

impl ContextStats {
    pub(crate) fn absent() -> Self {
        Self {
            exists: false,
            expired: false,
            age_ms: None,
        }
    }
}

/// Per-context cache state for one user, plus diagnostics counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// One record per known context.
    pub contexts: HashMap<SuggestionContext, ContextStats>,
    /// How many reads this manager instance has answered from an expired
    /// entry because the remote fetch failed.
    pub stale_served: u64,
}
