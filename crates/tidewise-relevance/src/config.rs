//! Engine configuration.

use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tidewise_store::WeightPolicy;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Maximum limit for search results to prevent excessive memory usage.
pub const MAX_SEARCH_LIMIT: usize = 1000;

/// Number of autocomplete suggestions returned.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Default number of recommendations.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub suggestion_limit: usize,
    pub recommendation_limit: usize,
    /// Run the four matchers on scoped threads.
    pub parallel_matchers: bool,
    pub weight_policy: WeightPolicy,
    /// Extra related-term entries merged over the built-in table.
    pub related_terms: HashMap<String, Vec<String>>,
    pub vocabulary: Vocabulary,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_SEARCH_LIMIT,
            max_limit: MAX_SEARCH_LIMIT,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            parallel_matchers: false,
            weight_policy: WeightPolicy::default(),
            related_terms: HashMap::new(),
            vocabulary: Vocabulary::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    pub fn with_parallel_matchers(mut self, enabled: bool) -> Self {
        self.parallel_matchers = enabled;
        self
    }

    /// Resolve a requested limit: `None` means the default, and anything
    /// above `max_limit` is capped.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}
