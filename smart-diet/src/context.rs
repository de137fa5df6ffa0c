//! Suggestion contexts and insight periods.
//!
//! A context is one of a small fixed set of suggestion use cases. Its string
//! form is used both as the `context` query value on the wire and as a
//! cache-key segment, so the variants here are the full key alphabet.

use serde::{Deserialize, Serialize};

/// A suggestion use case. Determines both the remote query shape and the
/// cache TTL that applies to the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionContext {
    /// Time-sensitive suggestions for the current day.
    Today,
    /// Meal-plan optimization suggestions.
    Optimize,
    /// Exploratory suggestions; tolerates long staleness.
    Discover,
    /// Nutritional insight suggestions.
    Insights,
}

impl SuggestionContext {
    /// Every known context, in a stable order. Bulk invalidation and cache
    /// statistics iterate this list.
    pub const ALL: [SuggestionContext; 4] = [
        SuggestionContext::Today,
        SuggestionContext::Optimize,
        SuggestionContext::Discover,
        SuggestionContext::Insights,
    ];

    /// Stable string form, used as the wire enum value and key segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionContext::Today => "today",
            SuggestionContext::Optimize => "optimize",
            SuggestionContext::Discover => "discover",
            SuggestionContext::Insights => "insights",
        }
    }
}

impl std::fmt::Display for SuggestionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting period for diet insights. Keys the auxiliary insights cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightsPeriod {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl InsightsPeriod {
    /// Every known period, in a stable order.
    pub const ALL: [InsightsPeriod; 4] = [
        InsightsPeriod::Day,
        InsightsPeriod::Week,
        InsightsPeriod::Month,
        InsightsPeriod::Year,
    ];

    /// Stable string form, used as the `period` query value and key segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightsPeriod::Day => "day",
            InsightsPeriod::Week => "week",
            InsightsPeriod::Month => "month",
            InsightsPeriod::Year => "year",
        }
    }
}

impl std::fmt::Display for InsightsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_string_forms_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for context in SuggestionContext::ALL {
            assert!(seen.insert(context.as_str()));
        }
    }

    #[test]
    fn context_serializes_as_wire_string() {
        let json = serde_json::to_string(&SuggestionContext::Today).unwrap();
        assert_eq!(json, "\"today\"");
    }

    #[test]
    fn period_defaults_to_week() {
        assert_eq!(InsightsPeriod::default(), InsightsPeriod::Week);
    }
}
