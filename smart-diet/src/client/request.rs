//! Request and feedback types with their wire mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::SuggestionContext;

/// Optional filters for a suggestions request.
///
/// Every field maps to a query parameter; unset fields are omitted from the
/// request entirely. List fields are comma-joined on the wire,
/// `target_macros` is JSON-encoded.
#[derive(Debug, Clone, Default)]
pub struct SuggestionOptions {
    pub max_suggestions: Option<u32>,
    pub include_history: Option<bool>,
    pub include_recommendations: Option<bool>,
    pub meal_context: Option<String>,
    pub current_meal_plan_id: Option<String>,
    pub calorie_budget: Option<f64>,
    pub dietary_restrictions: Vec<String>,
    pub cuisine_preferences: Vec<String>,
    pub excluded_ingredients: Vec<String>,
    /// Target macro grams by name, e.g. `{"protein": 120.0}`.
    pub target_macros: Option<BTreeMap<String, f64>>,
}

/// One suggestions request: context, user, and optional filters.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub context: SuggestionContext,
    pub user_id: String,
    pub options: SuggestionOptions,
}

impl SuggestionRequest {
    pub fn new(context: SuggestionContext, user_id: impl Into<String>) -> Self {
        Self {
            context,
            user_id: user_id.into(),
            options: SuggestionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SuggestionOptions) -> Self {
        self.options = options;
        self
    }

    /// The `GET /smart-diet/suggestions` query parameters for this request.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("context".to_string(), self.context.as_str().to_string()),
            ("user_id".to_string(), self.user_id.clone()),
        ];
        let opts = &self.options;
        if let Some(max) = opts.max_suggestions {
            pairs.push(("max_suggestions".to_string(), max.to_string()));
        }
        if let Some(v) = opts.include_history {
            pairs.push(("include_history".to_string(), v.to_string()));
        }
        if let Some(v) = opts.include_recommendations {
            pairs.push(("include_recommendations".to_string(), v.to_string()));
        }
        if let Some(v) = &opts.meal_context {
            pairs.push(("meal_context".to_string(), v.clone()));
        }
        if let Some(v) = &opts.current_meal_plan_id {
            pairs.push(("current_meal_plan_id".to_string(), v.clone()));
        }
        if let Some(v) = opts.calorie_budget {
            pairs.push(("calorie_budget".to_string(), v.to_string()));
        }
        if !opts.dietary_restrictions.is_empty() {
            pairs.push((
                "dietary_restrictions".to_string(),
                opts.dietary_restrictions.join(","),
            ));
        }
        if !opts.cuisine_preferences.is_empty() {
            pairs.push((
                "cuisine_preferences".to_string(),
                opts.cuisine_preferences.join(","),
            ));
        }
        if !opts.excluded_ingredients.is_empty() {
            pairs.push((
                "excluded_ingredients".to_string(),
                opts.excluded_ingredients.join(","),
            ));
        }
        if let Some(macros) = &opts.target_macros {
            // Non-finite values are unencodable in JSON; drop the parameter
            // rather than failing the whole request.
            if let Ok(encoded) = serde_json::to_string(macros) {
                pairs.push(("target_macros".to_string(), encoded));
            }
        }
        pairs
    }
}

/// A feedback record for one suggestion, `POST /smart-diet/feedback`.
///
/// `action` is a free-form string ("accepted", "rejected", ...); the server
/// owns the vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionFeedback {
    pub suggestion_id: String,
    pub user_id: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction_rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_reason: Option<String>,
}

impl SuggestionFeedback {
    pub fn new(
        suggestion_id: impl Into<String>,
        user_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            suggestion_id: suggestion_id.into(),
            user_id: user_id.into(),
            action: action.into(),
            satisfaction_rating: None,
            meal_context: None,
            feedback_reason: None,
        }
    }
}
